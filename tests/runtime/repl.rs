//! Integration tests for the REPL and session

use std::fs;
use std::io::Cursor;

use cdl_runtime::{Repl, ScriptEditor, Session};

fn script(input: &str) -> Repl<ScriptEditor<Cursor<String>>> {
    Repl::with_editor(ScriptEditor::new(Cursor::new(input.to_string())))
        .with_session(Session::with_default_rules().unwrap())
        .without_banner()
        .with_prompt("")
}

#[test]
fn batch_script_adds_rules() {
    let mut repl = script(
        "ACTION a IS BLOCKED IF a.name IS 'Wait'\n\
         # comment\n\
         :check [name=Wait] [orig=3,3 dest=3,4 agent=1]\n",
    );
    repl.run().unwrap();
    assert_eq!(repl.session().len(), 4);
    assert_eq!(repl.error_count(), 0);
}

#[test]
fn batch_script_counts_errors() {
    let mut repl = script(
        "ACTION a IS BLOCKED IF a.name IS\n\
         :eval 99 []\n\
         :bogus\n\
         :rules\n",
    );
    repl.run().unwrap();
    assert_eq!(repl.error_count(), 3);
    assert_eq!(repl.session().len(), 3);
}

#[test]
fn quit_stops_script() {
    let mut repl = script(":quit\nACTION a IS BLOCKED IF a.time IS 0\n");
    repl.run().unwrap();
    assert_eq!(repl.session().len(), 3);
}

#[test]
fn eval_and_check_output() {
    let mut repl = script("");
    assert_eq!(
        repl.eval(":eval 2 [orig=1,1 dest=1,2] [orig=1,2 dest=1,1]").unwrap(),
        "blocked"
    );
    assert_eq!(
        repl.eval(":eval 0 [orig=1,1 dest=1,2] [orig=4,4 dest=4,5]").unwrap(),
        "not blocked"
    );
    let out = repl
        .eval(":check [orig=1,1 dest=1,2] [orig=1,2 dest=1,1 agent=1]")
        .unwrap();
    assert!(out.lines().all(|l| l.ends_with("not applicable (conflict)")));
}

#[test]
fn load_command_appends_rules() {
    let path = std::env::temp_dir().join(format!("cdl_test_{}_repl.cdl", std::process::id()));
    fs::write(&path, "ACTION a IS BLOCKED IF a.agent IS 7\n").expect("write failed");

    let mut repl = script("");
    let out = repl.eval(&format!(":load {}", path.display()));
    let _ = fs::remove_file(&path);

    assert_eq!(out.unwrap(), format!("loaded 1 rules from {}", path.display()));
    assert_eq!(repl.session().len(), 4);
    assert_eq!(repl.eval(":eval 3 [agent=7]").unwrap(), "blocked");
}
