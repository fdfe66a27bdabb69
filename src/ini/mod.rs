//! A small INI decoder producing multi-valued `section<sep>key` entries.
//!
//! ```text
//! top = level                 top=level
//! [server]
//! host = example.com          server.host=example.com
//! tag = a                     server.tag=a
//! tag = b                     server.tag=b
//! debug                       server.debug=1
//! [server "tls"]
//! cert = "/etc/a.pem" ; pem   server.tls.cert=/etc/a.pem
//! motd = `line one            server.tls.motd=line one\nline two
//! line two`
//! ```
//!
//! Unquoted values run to the end of the line; comments (`;` or `#`) take a
//! whole line or follow a quoted value.

mod error;
mod reader;

use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

pub use error::{ParseError, ParseErrorKind};
pub use reader::Reader;

/// Receives decoded entries in document order.
pub trait Sink {
    fn add(&mut self, key: String, value: String);
}

impl Sink for Vec<(String, String)> {
    fn add(&mut self, key: String, value: String) {
        self.push((key, value));
    }
}

/// Case transformation applied to section and key names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum KeyCase {
    #[default]
    Sensitive,
    Upper,
    Lower,
}

impl KeyCase {
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Sensitive => name.to_string(),
            Self::Upper => name.to_uppercase(),
            Self::Lower => name.to_lowercase(),
        }
    }

    /// Parses a casing option, falling back to [`KeyCase::Sensitive`] with a
    /// warning when the option is not recognized.
    pub fn parse_lenient(option: &str) -> Self {
        option.parse().unwrap_or_else(|_| {
            warn!(option, "invalid case option, using case-sensitive");
            Self::Sensitive
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key case '{0}'")]
pub struct UnknownKeyCase(pub String);

impl FromStr for KeyCase {
    type Err = UnknownKeyCase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "s" | "cs" | "cased" | "case-sensitive" | "sensitive" => Ok(Self::Sensitive),
            "u" | "up" | "upper" => Ok(Self::Upper),
            "l" | "d" | "down" | "lower" => Ok(Self::Lower),
            _ => Err(UnknownKeyCase(s.to_string())),
        }
    }
}

impl TryFrom<String> for KeyCase {
    type Error = UnknownKeyCase;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
