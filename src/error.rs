use crate::exec::ExecError;
use thiserror::Error;

/// Top-level error type for the inienv binary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to write environment: {0}")]
    Output(#[source] std::io::Error),
}

impl Error {
    /// Process exit status to report for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Exec(err) => err.exit_code(),
            _ => 1,
        }
    }
}
