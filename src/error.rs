//! Error taxonomy shared by every tool.
//!
//! All variants are input-validation failures. A view catches them at the
//! callback boundary and shows the message in its status line.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolError>;

/// Which part of a JWT failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Structure,
    Header,
    Payload,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Segment::Structure => "token",
            Segment::Header => "header",
            Segment::Payload => "payload",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Malformed Base64 or percent-encoded input.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// JSON that failed to parse, with the 1-based position serde_json reports.
    #[error("invalid JSON: {message} (line {line}, column {column})")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("malformed token ({segment}): {reason}")]
    MalformedToken { segment: Segment, reason: String },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// JSON path expression that could not be parsed.
    #[error("invalid path expression: {0}")]
    InvalidPath(String),
}

impl ToolError {
    /// Short category label used by the status line.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::InvalidEncoding(_) => "InvalidEncoding",
            ToolError::ParseError { .. } => "ParseError",
            ToolError::MalformedToken { .. } => "MalformedToken",
            ToolError::InvalidTimestamp(_) => "InvalidTimestamp",
            ToolError::UnsupportedAlgorithm(_) => "UnsupportedAlgorithm",
            ToolError::InvalidPath(_) => "InvalidPath",
        }
    }

    pub(crate) fn malformed(segment: Segment, reason: impl Into<String>) -> Self {
        ToolError::MalformedToken {
            segment,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json appends " at line L column C" to Display; keep the bare message.
        let full = e.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };
        ToolError::ParseError {
            message,
            line: e.line(),
            column: e.column(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_keeps_position() {
        let err: ToolError = serde_json::from_str::<serde_json::Value>("{\"a\":}")
            .unwrap_err()
            .into();
        match err {
            ToolError::ParseError { line, column, ref message } => {
                assert_eq!(line, 1);
                assert_eq!(column, 6);
                assert!(!message.contains("at line"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn malformed_token_names_segment() {
        let err = ToolError::malformed(Segment::Payload, "not JSON");
        assert_eq!(err.to_string(), "malformed token (payload): not JSON");
        assert_eq!(err.kind(), "MalformedToken");
    }
}
