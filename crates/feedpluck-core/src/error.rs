use thiserror::Error;

use crate::http_client::HttpError;

/// Invalid input to request construction or to a source-client call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RequestError {
    #[error("base endpoint cannot be empty")]
    EmptyBase,
    #[error("base endpoint '{value}' is not an absolute URL: {reason}")]
    InvalidBase { value: String, reason: String },
    #[error("base endpoint '{value}' cannot carry path segments")]
    OpaqueBase { value: String },
    #[error("path level '{segment}' would be removed when the URL is resolved")]
    DotSegment { segment: String },

    #[error("{field} {value} is outside {min}..={max}")]
    CoordinateOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("timestamp must be RFC3339 or ISO-8601: '{value}'")]
    InvalidTimestamp { value: String },
    #[error("unknown annunciator '{value}', expected CommonsMain or LordsMain")]
    UnknownAnnunciator { value: String },
}

/// Coarse category of a JSON decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Not valid JSON: bad token, bad escape, trailing characters.
    Syntax,
    /// Input ended inside a value.
    Eof,
    /// Valid JSON that does not fit the requested target.
    Data,
    /// The underlying reader failed.
    Io,
}

impl DecodeErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Eof => "eof",
            Self::Data => "data",
            Self::Io => "io",
        }
    }
}

/// Response body could not be decoded as JSON.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid JSON ({}){}: {reason}", .kind.as_str(), position(.line, .column))]
pub struct DecodeError {
    kind: DecodeErrorKind,
    reason: String,
    line: usize,
    column: usize,
}

fn position(line: &usize, column: &usize) -> String {
    if *line == 0 {
        String::new()
    } else {
        format!(" at line {line} column {column}")
    }
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, reason: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            reason: reason.into(),
            line,
            column,
        }
    }

    pub const fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// 1-based line of the failure, 0 when unknown.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the failure, 0 when unknown.
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(error: serde_json::Error) -> Self {
        let kind = match error.classify() {
            serde_json::error::Category::Syntax => DecodeErrorKind::Syntax,
            serde_json::error::Category::Eof => DecodeErrorKind::Eof,
            serde_json::error::Category::Data => DecodeErrorKind::Data,
            serde_json::error::Category::Io => DecodeErrorKind::Io,
        };
        // serde_json appends " at line X column Y" to Display; keep the bare reason.
        let text = error.to_string();
        let reason = match text.rfind(" at line ") {
            Some(index) if error.line() > 0 => text[..index].to_owned(),
            _ => text,
        };
        Self::new(kind, reason, error.line(), error.column())
    }
}

/// Table specification errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("table must declare at least one column")]
    NoColumns,
    #[error("column name cannot be empty")]
    EmptyColumnName,
    #[error("duplicate column '{name}'")]
    DuplicateColumn { name: String },
}

/// Failure of one stage of a source-client pipeline.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidArgument(#[from] RequestError),

    #[error("network error: {0}")]
    Network(#[from] HttpError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("{url} returned status {status}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("response from {url} has no value at '{path}'")]
    MissingField { path: String, url: String },
}

impl ApiError {
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
