//! Backslash-escape decoding for quoted string literals.
//!
//! Recognized escapes inside `"` and `'` literals:
//!
//! ```text
//! \a \b \f \n \r \t \v \\      control characters and backslash
//! \" (in "..." only)  \' (in '...' only)
//! \xHH                         one byte, two hex digits
//! \ooo                         one byte, three octal digits (<= 0o377)
//! \uHHHH \UHHHHHHHH            a Unicode scalar value
//! ```
//!
//! Backtick literals are raw: no escapes, carriage returns are dropped.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EscapeError {
    #[error("literal is not enclosed in matching quotes")]
    Unterminated,

    #[error("unknown escape sequence '\\{0}'")]
    UnknownEscape(char),

    #[error("truncated escape sequence")]
    TruncatedEscape,

    #[error("invalid digit '{0}' in escape sequence")]
    InvalidDigit(char),

    #[error("escape value {0:#x} is out of range")]
    OutOfRange(u32),

    #[error("unescaped '{0}' inside quoted literal")]
    UnescapedQuote(char),

    #[error("newline inside double-quoted literal")]
    Newline,

    #[error("character literal must hold exactly one character")]
    NotOneCharacter,

    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Decodes a join separator given on the command line.
///
/// A value starting with a quote character is decoded as a complete quoted
/// literal. Anything else is decoded as the body of a double-quoted literal,
/// with bare `"` characters taken literally.
pub fn unescape_separator(raw: &str) -> Result<String, EscapeError> {
    match raw.chars().next() {
        None => Ok(String::new()),
        Some('"' | '\'' | '`') => unquote(raw),
        Some(_) => unquote(&format!("\"{}\"", raw.replace('"', "\\\""))),
    }
}

/// Decodes a complete quoted literal: `"..."`, `'.'` or `` `...` ``.
pub fn unquote(s: &str) -> Result<String, EscapeError> {
    let quote = s.chars().next().ok_or(EscapeError::Unterminated)?;
    if s.len() < 2 || !s.ends_with(quote) || !matches!(quote, '"' | '\'' | '`') {
        return Err(EscapeError::Unterminated);
    }
    let body = &s[quote.len_utf8()..s.len() - quote.len_utf8()];

    if quote == '`' {
        if body.contains('`') {
            return Err(EscapeError::UnescapedQuote('`'));
        }
        return Ok(body.replace('\r', ""));
    }

    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    let mut decoded = 0usize;
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => decode_escape(&mut chars, quote, &mut out)?,
            '\n' if quote == '"' => return Err(EscapeError::Newline),
            c if c == quote => return Err(EscapeError::UnescapedQuote(c)),
            c => push_char(&mut out, c),
        }
        decoded += 1;
    }

    if quote == '\'' && decoded != 1 {
        return Err(EscapeError::NotOneCharacter);
    }

    String::from_utf8(out).map_err(|_| EscapeError::InvalidUtf8)
}

/// Decodes one escape sequence whose leading backslash was already consumed,
/// appending the result to `out`.
pub(crate) fn decode_escape(
    chars: &mut Peekable<Chars<'_>>,
    quote: char,
    out: &mut Vec<u8>,
) -> Result<(), EscapeError> {
    let ch = chars.next().ok_or(EscapeError::TruncatedEscape)?;
    match ch {
        'a' => out.push(0x07),
        'b' => out.push(0x08),
        'f' => out.push(0x0c),
        'n' => out.push(b'\n'),
        'r' => out.push(b'\r'),
        't' => out.push(b'\t'),
        'v' => out.push(0x0b),
        '\\' => out.push(b'\\'),
        '\'' | '"' if ch == quote => push_char(out, ch),
        'x' => {
            let value = read_digits(chars, 2, 16)?;
            out.push(value as u8);
        }
        'u' | 'U' => {
            let width = if ch == 'u' { 4 } else { 8 };
            let value = read_digits(chars, width, 16)?;
            let decoded = char::from_u32(value).ok_or(EscapeError::OutOfRange(value))?;
            push_char(out, decoded);
        }
        '0'..='7' => {
            let rest = read_digits(chars, 2, 8)?;
            let value = (ch as u32 - '0' as u32) * 64 + rest;
            if value > 0xff {
                return Err(EscapeError::OutOfRange(value));
            }
            out.push(value as u8);
        }
        other => return Err(EscapeError::UnknownEscape(other)),
    }
    Ok(())
}

fn read_digits(chars: &mut Peekable<Chars<'_>>, count: usize, radix: u32) -> Result<u32, EscapeError> {
    let mut value = 0u32;
    for _ in 0..count {
        let ch = chars.next().ok_or(EscapeError::TruncatedEscape)?;
        let digit = ch.to_digit(radix).ok_or(EscapeError::InvalidDigit(ch))?;
        value = value * radix + digit;
    }
    Ok(value)
}

fn push_char(out: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}
