//! Entry point.
//!
//! ```text
//! Cli::parse() --> logging --> Snapshot::capture()
//!   --> Defaults (TOML file, INIENV__*) --> Composition
//!   --> print (no command) | exec (command)
//! ```

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn};

use inienv::cli::Cli;
use inienv::exec::exec;
use inienv::input::load_inputs;
use inienv::logging::init_logging;
use inienv::{Composition, Defaults, Error, Snapshot};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_level) {
        eprintln!("inienv: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let snapshot = Snapshot::capture();

    let defaults = Defaults::load(cli.config.as_deref(), &snapshot).unwrap_or_else(|e| {
        // toml errors render a trailing newline after the source excerpt.
        let message = e.to_string();
        warn!(error = %message.trim_end(), "ignoring configured defaults");
        Defaults::default()
    });

    let env = Composition::builder()
        .with_policy(cli.policy(&defaults))
        .with_reader(cli.reader(&defaults))
        .with_assignments(&cli.assignments)
        .with_imports(&cli.imports)
        .with_inputs(load_inputs(&cli.inputs()))
        .compose(&snapshot);

    if cli.command.is_empty() {
        return print_env(&env);
    }

    Err(exec(&cli.command, &env).into())
}

fn print_env(env: &[String]) -> Result<(), Error> {
    let mut out = BufWriter::new(io::stdout().lock());
    let result = env
        .iter()
        .try_for_each(|pair| writeln!(out, "{pair}"))
        .and_then(|()| out.flush());

    match result {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(Error::Output(e)),
        _ => Ok(()),
    }
}
