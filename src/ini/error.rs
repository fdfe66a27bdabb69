use thiserror::Error;

use crate::escape::EscapeError;

#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("input is not valid UTF-8")]
    InvalidUtf8,

    #[error("section header is missing ']'")]
    UnclosedSection,

    #[error("invalid section header '{0}'")]
    InvalidSection(String),

    #[error("expected a key")]
    MissingKey,

    #[error("quoted value is not terminated")]
    UnterminatedString,

    #[error("unexpected '{0}' after value")]
    TrailingCharacters(char),

    #[error("invalid escape in quoted value: {0}")]
    Escape(#[from] EscapeError),
}
