//! The interactive REPL.
//!
//! Every input line is either a command starting with `:` or a CDL statement
//! to add to the session:
//!
//! ```text
//! cdl> ACTION a IS BLOCKED IF a.name IS 'Push(N,N)'
//! cdl> :eval 3 [name=Push(N,N) orig=1,1 dest=0,1]
//! cdl> :check [orig=1,0 dest=1,1] [orig=1,2 dest=1,1 agent=1]
//! ```

use std::io::{self, Write};

use cdl_engine::ValidationReport;
use cdl_foundation::{Action, Error, Result};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;

const HELP: &str = "\
Statements:
  ACTION a IS BLOCKED IF <predicate>                  add an applicability rule
  ACTION a IS BLOCKED BY ACTION b IF <predicate>      add a conflict rule

Commands:
  :rules                         list loaded rules
  :load FILE                     load rules from FILE
  :eval N ACTION [ACTION]        evaluate rule N against one or two actions
  :check ACTION...               validate a joint action
  :clear                         remove all rules
  :help                          show this message
  :quit                          exit

Actions are written [name=Move(E) orig=1,1 dest=1,2 time=0 agent=0];
every key is optional.";

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Loaded rules and settings.
    session: Session,

    /// Whether to show the welcome banner and farewell.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Number of inputs that ended in an error.
    errors: usize,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: Session::new(),
            show_banner: true,
            prompt: "cdl> ".to_string(),
            errors: 0,
        }
    }

    /// Sets the session for this REPL.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Returns how many inputs have failed so far.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors
    }

    /// Runs the REPL loop until EOF or `:quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}

        if self.show_banner {
            println!("\nGoodbye!");
        }
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let input = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(true);
        }
        self.editor.add_history(&input);

        if matches!(trimmed, ":quit" | ":q" | ":exit") {
            return Ok(false);
        }

        match self.eval(trimmed) {
            Ok(output) => println!("{output}"),
            Err(e) => self.print_error(&e),
        }
        Ok(true)
    }

    /// Evaluates one line of input and returns the text to print.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is malformed, the statement does not
    /// parse, or rule evaluation fails.
    pub fn eval(&mut self, input: &str) -> Result<String> {
        let input = input.trim();
        let Some(command_line) = input.strip_prefix(':') else {
            let index = self.session.add_rule(input)?;
            return Ok(format!("rule {index} added"));
        };

        let (command, args) = command_line
            .split_once(char::is_whitespace)
            .map_or((command_line, ""), |(c, a)| (c, a.trim()));

        match command {
            "help" | "h" | "?" => Ok(HELP.to_string()),
            "rules" => Ok(self.format_rules()),
            "load" => self.cmd_load(args),
            "eval" => self.cmd_eval(args),
            "check" => self.cmd_check(args),
            "clear" => {
                let count = self.session.len();
                self.session.clear();
                Ok(format!("removed {count} rules"))
            }
            other => Err(Error::invalid_command(
                format!(":{other}"),
                "unknown command, try :help",
            )),
        }
    }

    fn format_rules(&self) -> String {
        if self.session.is_empty() {
            return "no rules loaded".to_string();
        }
        self.session
            .rules()
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("{i:>3}: {rule}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn cmd_load(&mut self, args: &str) -> Result<String> {
        if args.is_empty() {
            return Err(Error::invalid_command(":load", "expected a file path"));
        }
        let count = self.session.load_file(args)?;
        Ok(format!("loaded {count} rules from {args}"))
    }

    fn cmd_eval(&self, args: &str) -> Result<String> {
        let (index, rest) = args
            .split_once(char::is_whitespace)
            .ok_or_else(|| Error::invalid_command(":eval", "expected a rule number and actions"))?;
        let index: usize = index
            .parse()
            .map_err(|_| Error::invalid_command(":eval", format!("invalid rule number {index:?}")))?;
        let rule = self
            .session
            .rule(index)
            .ok_or_else(|| Error::invalid_command(":eval", format!("no rule {index}")))?;

        let actions = parse_actions(rest)?;
        let (primary, secondary) = match actions.as_slice() {
            [primary] => (primary, None),
            [primary, secondary] => (primary, Some(secondary)),
            _ => {
                return Err(Error::invalid_command(
                    ":eval",
                    format!("expected one or two actions, found {}", actions.len()),
                ));
            }
        };

        let blocked = rule.bind_and_evaluate(primary, secondary)?;
        Ok(if blocked { "blocked" } else { "not blocked" }.to_string())
    }

    fn cmd_check(&self, args: &str) -> Result<String> {
        let actions = parse_actions(args)?;
        if actions.is_empty() {
            return Err(Error::invalid_command(":check", "expected at least one action"));
        }
        let report = self.session.check(&actions)?;
        Ok(format_report(&actions, &report))
    }

    /// Prints an error to stderr.
    fn print_error(&mut self, error: &Error) {
        self.errors += 1;
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    /// Prints the welcome banner.
    fn print_banner(&self) {
        println!("\x1b[1;36mCDL\x1b[0m rule shell v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "{} rules loaded. Type :help for commands, Ctrl+D to exit.\n",
            self.session.len()
        );

        let _ = io::stdout().flush();
    }
}

/// Splits `text` into bracketed action literals and parses each one.
fn parse_actions(text: &str) -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    let mut rest = text.trim_start();

    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return Err(Error::invalid_command(
                "action list",
                format!("expected '[', found {rest:?}"),
            ));
        }
        let end = rest
            .find(']')
            .ok_or_else(|| Error::invalid_command("action list", "missing ']'"))?;
        actions.push(rest[..=end].parse()?);
        rest = rest[end + 1..].trim_start();
    }

    Ok(actions)
}

fn format_report(actions: &[Action], report: &ValidationReport) -> String {
    actions
        .iter()
        .enumerate()
        .map(|(i, action)| {
            let mut reasons = Vec::new();
            if report.occupied[i] {
                reasons.push("occupied");
            }
            if report.blocked[i] {
                reasons.push("blocked");
            }
            if report.conflicting[i] {
                reasons.push("conflict");
            }
            if reasons.is_empty() {
                format!("{i:>3}: {action}: applicable")
            } else {
                format!("{i:>3}: {action}: not applicable ({})", reasons.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
