//! Error types for parsing and navigation.
//!
//! Every failure is terminal for the operation that raised it: the parser
//! never returns a partial tree, and a failed query yields no handle.

use std::fmt;

use thiserror::Error;

use crate::tree::NodeKind;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed input: bad list/map/bracket syntax or unconsumed bytes.
    #[error("{} at line {line}, column {column} (offset {offset})", .code.message())]
    Structural {
        code: StructuralErrorCode,
        /// Byte offset where the problem was detected.
        offset: usize,
        /// 1-based line number.
        line: usize,
        /// 1-based column, in bytes.
        column: usize,
    },

    /// A query named something the tree does not contain.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// An operation invoked on a node variant that does not support it.
    #[error("`{op}` is not supported on {kind} nodes")]
    Type { op: Op, kind: NodeKind },
}

impl Error {
    /// Build a structural error, deriving line and column from `offset`.
    pub(crate) fn structural(code: StructuralErrorCode, source: &[u8], offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];
        let line = memchr::memchr_iter(b'\n', before).count() + 1;
        let line_start = memchr::memrchr(b'\n', before).map_or(0, |nl| nl + 1);
        Error::Structural {
            code,
            offset,
            line,
            column: offset - line_start + 1,
        }
    }

    /// The structural error code, if this is a parse error.
    pub fn structural_code(&self) -> Option<StructuralErrorCode> {
        match self {
            Error::Structural { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, Error::Lookup(_))
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Error::Type { .. })
    }
}

/// Error codes for structural (parse) errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StructuralErrorCode {
    /// `[` without a matching `]`
    UnclosedList = 0,
    /// Map key not followed by `:`
    MissingColon,
    /// A value was required but the input had none
    ExpectedValue,
    /// Non-whitespace bytes after the top-level value
    TrailingInput,
    /// Nesting exceeded the configured depth limit
    TooDeep,
    /// Buffer too large for 32-bit spans
    InputTooLarge,
}

impl StructuralErrorCode {
    /// Get a human-readable message for this error code.
    pub fn message(self) -> &'static str {
        match self {
            Self::UnclosedList => "unclosed inline list",
            Self::MissingColon => "expected ':' after map key",
            Self::ExpectedValue => "expected a value",
            Self::TrailingInput => "unexpected input after document",
            Self::TooDeep => "nesting too deep",
            Self::InputTooLarge => "input larger than 4 GiB",
        }
    }
}

/// Failed lookups through the navigation API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("key not found: {key:?}")]
    MissingKey { key: String },

    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no element with {field:?} equal to {value:?}")]
    NoMatch { field: String, value: String },

    #[error("expected {expected} elements, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

/// Columns of the dispatch table, named for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Index,
    Key,
    Len,
    Text,
    Number,
    Find,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Op::Index => "index",
            Op::Key => "key",
            Op::Len => "len",
            Op::Text => "text",
            Op::Number => "number",
            Op::Find => "find",
        })
    }
}
