//! Glob-like name patterns (`*`, `?`, backslash escapes) compiled to anchored regexes.

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid wildcard pattern '{pattern}': {source}")]
pub struct WildcardError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// A compiled wildcard pattern that must match a whole candidate string.
///
/// | Pattern   | Meaning                         |
/// |-----------|---------------------------------|
/// | `*`       | zero or more of any character   |
/// | `?`       | exactly one character           |
/// | `\c`      | the character `c`, literally    |
/// | trailing `\` | a literal backslash          |
#[derive(Debug, Clone)]
pub struct Wildcard {
    regex: Regex,
}

impl Wildcard {
    /// Compiles `pattern` into a matcher.
    pub fn new(pattern: &str) -> Result<Self, WildcardError> {
        let regex = Regex::new(&translate(pattern)).map_err(|source| WildcardError {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// Returns true if `name` contains a wildcard metacharacter.
    pub fn is_pattern(name: &str) -> bool {
        name.contains(['*', '?'])
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

/// Translates a wildcard pattern into regex source anchored at both ends.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("(?s)^");

    let mut escaped = false;
    for ch in pattern.chars() {
        if escaped {
            push_literal(&mut out, ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            c => push_literal(&mut out, c),
        }
    }

    if escaped {
        out.push_str(r"\\");
    }

    out.push('$');
    out
}

fn push_literal(out: &mut String, ch: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
}
