use std::iter::Peekable;
use std::str::Chars;

use super::error::{ParseError, ParseErrorKind};
use super::{KeyCase, Sink};
use crate::escape::{self, decode_escape};

/// Value given to a key that appears without `=`.
pub const FLAG_VALUE: &str = "1";

/// Decoder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reader {
    /// Inserted between a section name and a key name.
    pub key_separator: String,
    pub casing: KeyCase,
}

impl Default for Reader {
    fn default() -> Self {
        Self {
            key_separator: ".".to_string(),
            casing: KeyCase::Sensitive,
        }
    }
}

impl Reader {
    pub fn new(key_separator: impl Into<String>, casing: KeyCase) -> Self {
        Self {
            key_separator: key_separator.into(),
            casing,
        }
    }

    /// Decodes `src`, handing each entry to `dst` as soon as it is complete.
    ///
    /// On error, the entries decoded before the failing line have already
    /// been delivered. Returns the number of entries delivered.
    pub fn read<S: Sink + ?Sized>(&self, src: &[u8], dst: &mut S) -> Result<usize, ParseError> {
        let text = std::str::from_utf8(src).map_err(|_| ParseError {
            line: 1,
            kind: ParseErrorKind::InvalidUtf8,
        })?;
        let mut parser = Parser {
            reader: self,
            chars: text.chars().peekable(),
            line: 1,
            section: String::new(),
            delivered: 0,
        };
        parser
            .run(dst)
            .map_err(|kind| ParseError {
                line: parser.line,
                kind,
            })?;
        Ok(parser.delivered)
    }
}

struct Parser<'r, 's> {
    reader: &'r Reader,
    chars: Peekable<Chars<'s>>,
    line: usize,
    section: String,
    delivered: usize,
}

impl Parser<'_, '_> {
    fn run<S: Sink + ?Sized>(&mut self, dst: &mut S) -> Result<(), ParseErrorKind> {
        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                None => return Ok(()),
                Some(';' | '#') => self.skip_line(),
                Some('[') => self.section()?,
                Some(_) => {
                    let (key, value) = self.entry()?;
                    dst.add(key, value);
                    self.delivered += 1;
                }
            }
        }
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if ch == Some('\n') {
            self.line += 1;
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.next();
        }
    }

    fn skip_blanks(&mut self) {
        while self.chars.next_if(|&c| matches!(c, ' ' | '\t' | '\r')).is_some() {}
    }

    /// Consumes the rest of the current line, leaving the newline.
    fn skip_line(&mut self) {
        while self.chars.next_if(|&c| c != '\n').is_some() {}
    }

    /// After a header or quoted value only blanks and a comment may follow.
    fn end_of_line(&mut self) -> Result<(), ParseErrorKind> {
        self.skip_blanks();
        match self.chars.peek() {
            None | Some('\n') => Ok(()),
            Some(';' | '#') => {
                self.skip_line();
                Ok(())
            }
            Some(&c) => Err(ParseErrorKind::TrailingCharacters(c)),
        }
    }

    fn section(&mut self) -> Result<(), ParseErrorKind> {
        self.next();
        let mut header = String::new();
        loop {
            match self.chars.peek() {
                None | Some('\n') => return Err(ParseErrorKind::UnclosedSection),
                Some(']') => {
                    self.next();
                    break;
                }
                Some(_) => header.extend(self.next()),
            }
        }
        self.section = self.section_name(header.trim())?;
        self.end_of_line()
    }

    fn section_name(&self, header: &str) -> Result<String, ParseErrorKind> {
        let casing = self.reader.casing;
        let Some(quote) = header.find('"') else {
            return Ok(casing.apply(header));
        };

        let name = header[..quote].trim_end();
        if name.is_empty() {
            return Err(ParseErrorKind::InvalidSection(header.to_string()));
        }
        let sub = escape::unquote(&header[quote..])
            .map_err(|_| ParseErrorKind::InvalidSection(header.to_string()))?;
        Ok(format!(
            "{}{}{}",
            casing.apply(name),
            self.reader.key_separator,
            casing.apply(&sub)
        ))
    }

    fn entry(&mut self) -> Result<(String, String), ParseErrorKind> {
        let mut raw_key = String::new();
        while let Some(c) = self.chars.next_if(|&c| !matches!(c, '=' | '\n' | ';' | '#')) {
            raw_key.push(c);
        }
        let key = raw_key.trim();
        if key.is_empty() {
            return Err(ParseErrorKind::MissingKey);
        }
        let key = self.compose_key(key);

        let value = match self.chars.peek() {
            Some('=') => {
                self.next();
                self.value()?
            }
            Some(';' | '#') => {
                self.skip_line();
                FLAG_VALUE.to_string()
            }
            _ => FLAG_VALUE.to_string(),
        };
        Ok((key, value))
    }

    fn compose_key(&self, key: &str) -> String {
        let key = self.reader.casing.apply(key);
        if self.section.is_empty() {
            key
        } else {
            format!("{}{}{}", self.section, self.reader.key_separator, key)
        }
    }

    fn value(&mut self) -> Result<String, ParseErrorKind> {
        self.skip_blanks();
        match self.chars.peek() {
            Some('"') => {
                self.next();
                let value = self.quoted()?;
                self.end_of_line()?;
                Ok(value)
            }
            Some('`') => {
                self.next();
                let value = self.raw()?;
                self.end_of_line()?;
                Ok(value)
            }
            _ => {
                let mut value = String::new();
                while let Some(c) = self.chars.next_if(|&c| c != '\n') {
                    value.push(c);
                }
                Ok(value.trim_end().to_string())
            }
        }
    }

    fn quoted(&mut self) -> Result<String, ParseErrorKind> {
        let mut buf = Vec::new();
        loop {
            match self.next() {
                None => return Err(ParseErrorKind::UnterminatedString),
                Some('"') => break,
                Some('\\') => {
                    if self.chars.peek() == Some(&'\n') {
                        self.next();
                        continue;
                    }
                    decode_escape(&mut self.chars, '"', &mut buf)?;
                }
                Some(c) => {
                    let mut tmp = [0u8; 4];
                    buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
                }
            }
        }
        String::from_utf8(buf).map_err(|_| ParseErrorKind::Escape(escape::EscapeError::InvalidUtf8))
    }

    fn raw(&mut self) -> Result<String, ParseErrorKind> {
        let mut value = String::new();
        loop {
            match self.next() {
                None => return Err(ParseErrorKind::UnterminatedString),
                Some('`') => return Ok(value),
                Some('\r') => {}
                Some(c) => value.push(c),
            }
        }
    }
}
