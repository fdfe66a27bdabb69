//! INI inputs: reading files or standard input and merging them into an
//! [`Accumulator`].

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::env::Accumulator;
use crate::ini::Reader;

/// Argument value that selects standard input.
pub const STDIN_ARG: &str = "-";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InputError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),
}

/// Where an INI document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIN_ARG {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Reads the whole document.
    pub fn read(&self) -> Result<ConfigInput, InputError> {
        let bytes = match self {
            Self::Stdin => {
                let mut buf = Vec::new();
                std::io::stdin()
                    .lock()
                    .read_to_end(&mut buf)
                    .map_err(InputError::Stdin)?;
                buf
            }
            Self::File(path) => read_file(path)?,
        };
        Ok(ConfigInput {
            origin: self.to_string(),
            bytes,
        })
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str(STDIN_ARG),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, InputError> {
    std::fs::read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// The raw bytes of one INI document and where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigInput {
    pub origin: String,
    pub bytes: Vec<u8>,
}

impl ConfigInput {
    pub fn new(origin: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            origin: origin.into(),
            bytes: bytes.into(),
        }
    }
}

/// Reads every source in order. Unreadable sources are logged and skipped.
pub fn load_inputs(sources: &[InputSource]) -> Vec<ConfigInput> {
    sources
        .iter()
        .filter_map(|source| match source.read() {
            Ok(input) => Some(input),
            Err(err) => {
                warn!(path = %source, error = %err, "skipping unreadable input");
                None
            }
        })
        .collect()
}

/// Decodes `input` and appends its entries to `acc`.
///
/// A parse error is logged; entries decoded before it stay merged.
pub fn import_config(acc: &mut Accumulator, input: &ConfigInput, reader: &Reader) -> usize {
    let mut added = 0;
    let result = reader.read(&input.bytes, &mut Counting { acc, added: &mut added });
    match result {
        Ok(_) => debug!(path = %input.origin, added, "merged INI input"),
        Err(err) => warn!(path = %input.origin, error = %err, added, "error parsing INI input"),
    }
    added
}

struct Counting<'a> {
    acc: &'a mut Accumulator,
    added: &'a mut usize,
}

impl crate::ini::Sink for Counting<'_> {
    fn add(&mut self, key: String, value: String) {
        self.acc.append(key, value);
        *self.added += 1;
    }
}
