//! compiler::error
//!
//! Errors raised while compiling a schema.
//!
//! A syntax error aborts the whole run. Its `Display` form is the two-line
//! diagnostic written to stderr: the offending input line, then the cause.

use std::io;

use thiserror::Error;

use crate::core::types::Sink;

/// Errors from schema compilation.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("At input line \"{line}\":\nProcessing aborted: {cause}")]
    Syntax { line: String, cause: SyntaxCause },

    #[error("failed to read schema: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write {sink} header: {source}")]
    Write {
        sink: Sink,
        #[source]
        source: io::Error,
    },
}

impl CompileError {
    /// Build a syntax error for a raw input line.
    ///
    /// Trailing whitespace is dropped from the reported line.
    pub fn syntax(raw_line: &str, cause: SyntaxCause) -> Self {
        CompileError::Syntax {
            line: raw_line.trim_end().to_string(),
            cause,
        }
    }

    /// Check if this is a schema syntax error (as opposed to I/O).
    pub fn is_syntax(&self) -> bool {
        matches!(self, CompileError::Syntax { .. })
    }
}

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxCause {
    /// The line's shape is not a directive valid in the current state.
    #[error("syntax error")]
    Malformed,

    /// Inside a struct, the line is neither a field nor `end`.
    #[error("unknown definition in struct {0}")]
    UnknownDefinition(String),
}
