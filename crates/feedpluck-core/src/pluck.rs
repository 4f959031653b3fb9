//! Safe nested-field extraction.
//!
//! [`pluck`] walks a [`Path`] through a [`JsonValue`] and never fails: when a
//! key is absent, an index is out of bounds or a step meets the wrong kind of
//! container, the walk stops and the caller's default comes back instead.
//!
//! ## Found vs. default
//!
//! The outcome says which branch was taken. An explicit `null` at the end of a
//! reachable path is [`PluckResult::Found`]; an unreachable path is
//! [`PluckResult::Default`]:
//!
//! ```rust
//! use feedpluck_core::{pluck_value, Path, PluckResult};
//! use serde_json::json;
//!
//! let doc = json!({"probabilityOfPrecipitation": {"value": null}});
//! let found = pluck_value(&doc, &"probabilityOfPrecipitation.value".parse::<Path>()?, json!(0));
//! assert_eq!(found, PluckResult::Found(json!(null)));
//!
//! let missing = pluck_value(&doc, &"probabilityOfPrecipitation.unitCode".parse::<Path>()?, json!(0));
//! assert_eq!(missing, PluckResult::Default(json!(0)));
//! # Ok::<(), feedpluck_core::PathParseError>(())
//! ```
//!
//! ## Path syntax
//!
//! | Text | Steps |
//! |------|-------|
//! | `slides[0].lines[1]` | `Key("slides")`, `Index(0)`, `Key("lines")`, `Index(1)` |
//! | `properties.forecastHourly` | `Key("properties")`, `Key("forecastHourly")` |
//! | `["a.b"][2]` | `Key("a.b")`, `Index(2)` |
//! | `` (empty) | no steps, the root |

use std::fmt::{Display, Formatter, Write};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::json::JsonValue;

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Object member access.
    Key(String),
    /// Array element access.
    Index(usize),
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Ordered sequence of keys and indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// The empty path, which addresses the root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.steps.push(PathStep::Key(key.into()));
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.steps.push(PathStep::Index(index));
        self
    }

    /// This path followed by every step of `tail`.
    pub fn join(&self, tail: &Path) -> Self {
        let mut steps = self.steps.clone();
        steps.extend(tail.steps.iter().cloned());
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn parse(text: &str) -> Result<Self, PathParseError> {
        PathParser::new(text).parse()
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl FromStr for Path {
    type Err = PathParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (position, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Index(index) => write!(f, "[{index}]")?,
                PathStep::Key(key) if is_bare_key(key) => {
                    if position > 0 {
                        f.write_char('.')?;
                    }
                    f.write_str(key)?;
                }
                PathStep::Key(key) => {
                    f.write_str("[\"")?;
                    for ch in key.chars() {
                        if ch == '"' || ch == '\\' {
                            f.write_char('\\')?;
                        }
                        f.write_char(ch)?;
                    }
                    f.write_str("\"]")?;
                }
            }
        }
        Ok(())
    }
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['.', '[', ']', '"', '\\'])
}

/// Dotted path text could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    #[error("empty key at offset {offset}")]
    EmptyKey { offset: usize },
    #[error("expected ']' at offset {offset}")]
    UnclosedBracket { offset: usize },
    #[error("invalid array index '{value}' at offset {offset}")]
    InvalidIndex { value: String, offset: usize },
    #[error("unterminated quoted key starting at offset {offset}")]
    UnterminatedQuote { offset: usize },
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
}

struct PathParser<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> PathParser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        Some(ch)
    }

    fn parse(mut self) -> Result<Path, PathParseError> {
        let mut steps = Vec::new();
        if self.text.is_empty() {
            return Ok(Path { steps });
        }

        if self.peek() != Some('[') {
            steps.push(self.bare_key()?);
        }

        while let Some(ch) = self.peek() {
            match ch {
                '.' => {
                    self.bump();
                    steps.push(self.bare_key()?);
                }
                '[' => {
                    self.bump();
                    steps.push(self.bracketed()?);
                }
                other => {
                    return Err(PathParseError::UnexpectedChar {
                        ch: other,
                        offset: self.offset,
                    })
                }
            }
        }

        Ok(Path { steps })
    }

    fn bare_key(&mut self) -> Result<PathStep, PathParseError> {
        let start = self.offset;
        while let Some(ch) = self.peek() {
            if matches!(ch, '.' | '[') {
                break;
            }
            if matches!(ch, ']' | '"' | '\\') {
                return Err(PathParseError::UnexpectedChar {
                    ch,
                    offset: self.offset,
                });
            }
            self.bump();
        }

        if self.offset == start {
            return Err(PathParseError::EmptyKey { offset: start });
        }
        Ok(PathStep::Key(self.text[start..self.offset].to_owned()))
    }

    fn bracketed(&mut self) -> Result<PathStep, PathParseError> {
        let step = if self.peek() == Some('"') {
            self.quoted_key()?
        } else {
            let start = self.offset;
            while let Some(ch) = self.peek() {
                if ch == ']' {
                    break;
                }
                self.bump();
            }
            let raw = &self.text[start..self.offset];
            let index = raw
                .parse::<usize>()
                .ok()
                .filter(|_| raw.bytes().all(|byte| byte.is_ascii_digit()))
                .ok_or_else(|| PathParseError::InvalidIndex {
                    value: raw.to_owned(),
                    offset: start,
                })?;
            PathStep::Index(index)
        };

        match self.bump() {
            Some(']') => Ok(step),
            _ => Err(PathParseError::UnclosedBracket {
                offset: self.offset,
            }),
        }
    }

    fn quoted_key(&mut self) -> Result<PathStep, PathParseError> {
        let start = self.offset;
        self.bump();
        let mut key = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(PathStep::Key(key)),
                Some('\\') => match self.bump() {
                    Some(escaped) => key.push(escaped),
                    None => return Err(PathParseError::UnterminatedQuote { offset: start }),
                },
                Some(ch) => key.push(ch),
                None => return Err(PathParseError::UnterminatedQuote { offset: start }),
            }
        }
    }
}

/// Which branch an extraction took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluckResult<T> {
    /// The path was reachable and the value had the requested shape.
    Found(T),
    /// The caller's default.
    Default(T),
}

impl<T> PluckResult<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Found(value) | Self::Default(value) => value,
        }
    }

    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }

    /// The found value, discarding a default.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Default(_) => None,
        }
    }

    pub const fn as_ref(&self) -> PluckResult<&T> {
        match self {
            Self::Found(value) => PluckResult::Found(value),
            Self::Default(value) => PluckResult::Default(value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PluckResult<U> {
        match self {
            Self::Found(value) => PluckResult::Found(f(value)),
            Self::Default(value) => PluckResult::Default(f(value)),
        }
    }
}

/// Follow `path` from `value`; `None` as soon as a step cannot be taken.
pub fn locate<'a>(value: &'a JsonValue, path: &Path) -> Option<&'a JsonValue> {
    path.steps
        .iter()
        .try_fold(value, |current, step| match (step, current) {
            (PathStep::Key(key), JsonValue::Object(object)) => object.get(key),
            (PathStep::Index(index), JsonValue::Array(items)) => items.get(*index),
            _ => None,
        })
}

/// Untyped extraction: the reachable value as-is, `null` included.
pub fn pluck_value(value: &JsonValue, path: &Path, default: JsonValue) -> PluckResult<JsonValue> {
    match locate(value, path) {
        Some(found) => PluckResult::Found(found.clone()),
        None => PluckResult::Default(default),
    }
}

/// Typed extraction.
///
/// The value at `path` is converted into `T`; a value of the wrong shape
/// yields the default just like an unreachable path does. Ask for
/// `Option<T>` to receive an explicit `null` as `Found(None)`.
pub fn pluck<'a, T>(value: &'a JsonValue, path: &Path, default: T) -> PluckResult<T>
where
    T: Deserialize<'a>,
{
    match locate(value, path).map(|found| T::deserialize(found)) {
        Some(Ok(found)) => PluckResult::Found(found),
        _ => PluckResult::Default(default),
    }
}

/// Method-call form of the extraction functions.
pub trait Pluck {
    fn locate(&self, path: &Path) -> Option<&JsonValue>;

    fn pluck<'a, T>(&'a self, path: &Path, default: T) -> PluckResult<T>
    where
        T: Deserialize<'a>;

    fn pluck_or<'a, T>(&'a self, path: &Path, default: T) -> T
    where
        T: Deserialize<'a>,
    {
        self.pluck(path, default).into_inner()
    }
}

impl Pluck for JsonValue {
    fn locate(&self, path: &Path) -> Option<&JsonValue> {
        locate(self, path)
    }

    fn pluck<'a, T>(&'a self, path: &Path, default: T) -> PluckResult<T>
    where
        T: Deserialize<'a>,
    {
        pluck(self, path, default)
    }
}
