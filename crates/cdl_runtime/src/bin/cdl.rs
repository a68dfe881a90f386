//! CDL CLI entry point.

use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use cdl_engine::ValidatorConfig;
use cdl_runtime::{Repl, ScriptEditor, Session};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    batch_mode: bool,
    no_default: bool,
    lenient: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "cdl=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--no-default" => config.no_default = true,
            "--lenient" => config.lenient = true,
            "-r" | "--rules" => {
                i += 1;
                if i >= args.len() {
                    return Err("--rules requires a file".into());
                }
                config.files.push(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

/// Returns `Ok(false)` if batch input contained errors.
fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(true);
    }

    if config.show_version {
        println!("cdl {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    let mut session = if config.no_default {
        Session::new()
    } else {
        Session::with_default_rules()?
    };
    if config.lenient {
        session = session.with_validator_config(ValidatorConfig::lenient());
    }
    for file in &config.files {
        session.load_file(file)?;
    }

    if config.batch_mode {
        let stdin = io::stdin();
        let mut repl = Repl::with_editor(ScriptEditor::new(stdin.lock()))
            .with_session(session)
            .without_banner()
            .with_prompt("");
        repl.run()?;
        return Ok(repl.error_count() == 0);
    }

    let mut repl = Repl::new()?.with_session(session);
    repl.run()?;
    Ok(true)
}

fn print_help() {
    println!(
        "\x1b[1mcdl\x1b[0m - Constraint definition language shell

\x1b[1mUSAGE:\x1b[0m
    cdl [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Rule files to load before starting

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -b, --batch        Read statements and commands from stdin (no prompt)
    -r, --rules FILE   Load a rule file (same as a positional FILE)
    --no-default       Start without the bundled conflict rules
    --lenient          Treat rules that fail to bind as not blocking

\x1b[1mEXAMPLES:\x1b[0m
    cdl                              Start with the default rules
    cdl --no-default level.cdl       Start with only the rules in level.cdl
    echo ':check [orig=0,0 dest=0,1] [orig=0,1 dest=0,0]' | cdl -b

\x1b[1mREPL COMMANDS:\x1b[0m
    :rules               List loaded rules
    :load FILE           Load a rule file
    :eval N ACTION...    Evaluate rule N against one or two actions
    :check ACTION...     Validate a joint action
    :help                Show statement and command syntax
    Ctrl+D               Exit REPL

Set RUST_LOG=cdl=debug to see parsing and validation traces."
    );
}
