//! Integration tests for rule file loading

use std::fs;
use std::path::PathBuf;

use cdl_foundation::{Action, ErrorCategory, ErrorKind};
use cdl_runtime::{ConstraintReader, DEFAULT_RULES, ReaderConfig};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("cdl_test_{}_{name}", std::process::id()));
    fs::write(&path, contents).expect("write failed");
    path
}

#[test]
fn default_rules_cover_mapf_conflicts() {
    let rules = ConstraintReader::default_rules().unwrap();
    let texts: Vec<String> = rules.iter().map(ToString::to_string).collect();
    assert_eq!(
        texts,
        vec![
            "ACTION a IS BLOCKED BY ACTION b IF a.dest IS b.dest",
            "ACTION a IS BLOCKED BY ACTION b IF a.dest IS b.orig",
            "ACTION a IS BLOCKED BY ACTION b IF a.edge OVERLAPS WITH b.edge",
        ]
    );
    assert!(DEFAULT_RULES.lines().any(|l| l.starts_with('#')));
}

#[test]
fn following_conflict() {
    let rules = ConstraintReader::default_rules().unwrap();
    let leader = Action::between((0, 1), (0, 2));
    let follower = Action::between((0, 0), (0, 1));
    assert!(rules[1].bind_and_evaluate(&follower, Some(&leader)).unwrap());
    assert!(!rules[1].bind_and_evaluate(&leader, Some(&follower)).unwrap());
}

#[test]
fn file_round_trip() {
    let path = write_temp(
        "level.cdl",
        "# level rules\n\nACTION a IS BLOCKED IF a.name IS 'Pull(S,N)'\nACTION a IS BLOCKED BY ACTION b IF a.dest IS b.dest\n",
    );
    let rules = ConstraintReader::new().read_path(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(rules.len(), 2);
    assert!(rules[0].is_single_context());
    assert!(!rules[1].is_single_context());
}

#[test]
fn file_error_names_file_and_line() {
    let path = write_temp(
        "broken.cdl",
        "ACTION a IS BLOCKED IF a.time IS 0\n# fine\nACTION a IS BLOCKED IF a.name IS\n",
    );
    let err = ConstraintReader::new().read_path(&path).unwrap_err();
    let _ = fs::remove_file(&path);

    assert_eq!(err.category(), ErrorCategory::Parse);
    let context = err.context.as_ref().unwrap();
    assert_eq!(context.line, Some(3));
    assert_eq!(
        context.source.as_deref(),
        Some(path.display().to_string().as_str())
    );
}

#[test]
fn configured_source_name_wins() {
    let path = write_temp("named.cdl", "ACTION a IS BLOCKED IF\n");
    let reader = ConstraintReader::with_config(ReaderConfig::default().with_source_name("maze"));
    let err = reader.read_path(&path).unwrap_err();
    let _ = fs::remove_file(&path);

    assert_eq!(err.context.unwrap().source.as_deref(), Some("maze"));
}

#[test]
fn missing_file_is_io_error() {
    let err = ConstraintReader::new()
        .read_path("/definitely/not/here.cdl")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io { ref path, .. } if path == "/definitely/not/here.cdl"));
}

#[test]
fn comment_prefix_is_configurable() {
    let source = "// vertex\nACTION a IS BLOCKED BY ACTION b IF a.dest IS b.dest\n";
    assert!(ConstraintReader::new().read_str(source).is_err());
    let reader = ConstraintReader::with_config(ReaderConfig::default().with_comment_prefix(Some("//")));
    assert_eq!(reader.read_str(source).unwrap().len(), 1);
}
