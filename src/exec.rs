//! Replacing the current process with the target program.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::env::split_pair;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecError {
    #[error("{program}: {source}")]
    NotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("error exec-ing to <{}>: {source}", .path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExecError {
    /// Process exit status to report for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound { .. } => 127,
            Self::Replace { .. } => 126,
        }
    }
}

/// Locates `program` on `PATH`. Names containing a path separator are
/// checked as given.
pub fn resolve(program: &str) -> Result<PathBuf, ExecError> {
    which::which(program).map_err(|source| ExecError::NotFound {
        program: program.to_string(),
        source,
    })
}

/// Builds the command for `path` with `args`, carrying exactly `env`.
pub fn command(path: &Path, args: &[String], env: &[String]) -> Command {
    let mut cmd = Command::new(path);
    cmd.args(args).env_clear().envs(env.iter().map(|entry| split_pair(entry)));
    cmd
}

/// Replaces the current process with `argv[0]`, using `env` as its whole
/// environment.
///
/// Only returns on failure.
pub fn exec(argv: &[String], env: &[String]) -> ExecError {
    let Some((program, args)) = argv.split_first() else {
        return ExecError::Replace {
            path: PathBuf::new(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "no program given"),
        };
    };

    let path = match resolve(program) {
        Ok(path) => path,
        Err(err) => return err,
    };

    let source = replace(command(&path, args, env));
    ExecError::Replace { path, source }
}

#[cfg(unix)]
fn replace(mut cmd: Command) -> std::io::Error {
    use std::os::unix::process::CommandExt;

    cmd.exec()
}

#[cfg(not(unix))]
fn replace(_cmd: Command) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "process replacement is not supported on this platform",
    )
}
