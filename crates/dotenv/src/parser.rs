//! Env-file content parsing.
//!
//! Responsibilities:
//! - Define the `Parser` seam the loader consumes.
//! - Provide `EnvFileParser` for `NAME=value` lines with quoting, escapes, comments and
//!   `export` prefixes.
//! - Record `${NAME}` references inside values without resolving them.
//!
//! Does NOT handle:
//! - Resolving references (see `loader.rs`). Parsing never reads the process environment.
//!
//! Invariants:
//! - Entries are returned in source order.
//! - Parse errors carry only a byte index, never the offending line.

use std::fmt;

use crate::error::{DotenvError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Reference(String),
}

/// A parsed value: literal text interleaved with `${NAME}` references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Value {
    segments: Vec<Segment>,
}

impl Value {
    /// A value without references.
    pub fn literal(text: impl Into<String>) -> Self {
        let mut value = Self::default();
        value.push_str(&text.into());
        value
    }

    /// Referenced variable names, in order of appearance.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Reference(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every reference with `lookup(name)`.
    ///
    /// References `lookup` cannot answer are kept as written.
    pub fn resolve(&self, lookup: impl Fn(&str) -> Option<String>) -> String {
        let mut resolved = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => resolved.push_str(text),
                Segment::Reference(name) => match lookup(name) {
                    Some(value) => resolved.push_str(&value),
                    None => {
                        resolved.push_str("${");
                        resolved.push_str(name);
                        resolved.push('}');
                    }
                },
            }
        }
        resolved
    }

    fn push_char(&mut self, c: char) {
        match self.segments.last_mut() {
            Some(Segment::Literal(text)) => text.push(c),
            _ => self.segments.push(Segment::Literal(c.to_string())),
        }
    }

    fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Literal(text)) => text.push_str(s),
            _ => self.segments.push(Segment::Literal(s.to_string())),
        }
    }

    fn push_reference(&mut self, name: &str) {
        self.segments.push(Segment::Reference(name.to_string()));
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolve(|_| None))
    }
}

/// A parsed `NAME=value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub value: Value,
}

impl Entry {
    /// An entry whose value is plain text.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Value::literal(value),
        }
    }
}

/// Turns a text blob into ordered entries.
pub trait Parser: Send + Sync {
    fn parse(&self, content: &str) -> Result<Vec<Entry>>;
}

/// Parser for the common `.env` grammar.
///
/// - `#` starts a comment at the beginning of a line or after whitespace.
/// - `export NAME=value` is accepted.
/// - Single-quoted values are taken verbatim.
/// - Double-quoted values may span lines and support `\n`, `\r`, `\t`, `\"`, `\\` and `\$`
///   escapes.
/// - `${NAME}` in double-quoted and unquoted values becomes a reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvFileParser;

impl Parser for EnvFileParser {
    fn parse(&self, content: &str) -> Result<Vec<Entry>> {
        let mut cursor = Cursor { src: content, pos: 0 };
        let mut entries = Vec::new();
        while let Some(entry) = cursor.next_entry()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split a `{NAME}` reference body off the text following a `$`.
fn reference_at(text: &str) -> Option<(&str, usize)> {
    let body = text.strip_prefix('{')?;
    let len = body.find(|c: char| !is_name_char(c)).unwrap_or(body.len());
    (len > 0 && body[len..].starts_with('}')).then_some((&body[..len], len + 2))
}

/// Append `text` to `value`, turning `${NAME}` into references.
fn push_interpolated(value: &mut Value, text: &str) {
    let mut rest = text;
    while let Some(idx) = rest.find('$') {
        value.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        match reference_at(after) {
            Some((name, consumed)) => {
                value.push_reference(name);
                rest = &after[consumed..];
            }
            None => {
                value.push_char('$');
                rest = after;
            }
        }
    }
    value.push_str(rest);
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    fn error(at: usize) -> DotenvError {
        DotenvError::InvalidFile { error_index: at }
    }

    fn next_entry(&mut self) -> Result<Option<Entry>> {
        loop {
            self.eat_while(char::is_whitespace);
            match self.peek() {
                None => return Ok(None),
                Some('#') => {
                    self.eat_while(|c| c != '\n');
                }
                Some(_) => break,
            }
        }

        let name = self.name()?;
        self.eat_while(is_blank);
        let at = self.pos;
        if self.bump() != Some('=') {
            return Err(Self::error(at));
        }
        self.eat_while(is_blank);

        let value = match self.peek() {
            Some('\'') => self.single_quoted()?,
            Some('"') => self.double_quoted()?,
            _ => return Ok(Some(Entry { name, value: self.unquoted() })),
        };
        self.end_of_line()?;

        Ok(Some(Entry { name, value }))
    }

    fn name(&mut self) -> Result<String> {
        let start = self.pos;
        let mut name = self.eat_while(is_name_char);
        if name == "export" && self.peek().is_some_and(is_blank) {
            self.eat_while(is_blank);
            name = self.eat_while(is_name_char);
        }
        if name.is_empty() {
            return Err(Self::error(start));
        }
        Ok(name.to_string())
    }

    fn single_quoted(&mut self) -> Result<Value> {
        let start = self.pos;
        self.bump();
        let text = self.eat_while(|c| c != '\'');
        if self.bump() != Some('\'') {
            return Err(Self::error(start));
        }
        Ok(Value::literal(text))
    }

    fn double_quoted(&mut self) -> Result<Value> {
        let start = self.pos;
        self.bump();
        let mut value = Value::default();
        loop {
            match self.bump() {
                None => return Err(Self::error(start)),
                Some('"') => return Ok(value),
                Some('\\') => match self.bump() {
                    None => return Err(Self::error(start)),
                    Some('n') => value.push_char('\n'),
                    Some('r') => value.push_char('\r'),
                    Some('t') => value.push_char('\t'),
                    Some(c @ ('"' | '\\' | '$')) => value.push_char(c),
                    Some(other) => {
                        value.push_char('\\');
                        value.push_char(other);
                    }
                },
                Some('$') => match reference_at(self.rest()) {
                    Some((name, consumed)) => {
                        value.push_reference(name);
                        self.pos += consumed;
                    }
                    None => value.push_char('$'),
                },
                Some(c) => value.push_char(c),
            }
        }
    }

    fn unquoted(&mut self) -> Value {
        let line = self.eat_while(|c| c != '\n');
        let end = line
            .char_indices()
            .find(|&(idx, c)| {
                c == '#' && (idx == 0 || line[..idx].ends_with(char::is_whitespace))
            })
            .map_or(line.len(), |(idx, _)| idx);

        let mut value = Value::default();
        push_interpolated(&mut value, line[..end].trim_end());
        value
    }

    fn end_of_line(&mut self) -> Result<()> {
        self.eat_while(is_blank);
        match self.peek() {
            None | Some('\n') | Some('\r') => Ok(()),
            Some('#') => {
                self.eat_while(|c| c != '\n');
                Ok(())
            }
            Some(_) => Err(Self::error(self.pos)),
        }
    }
}
