//! Compile-time diagnostics (spec.md §7): every error is tied to the
//! 1-based source line that caused it.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct CompilationError {
    pub line: usize,
    pub message: String,
}

impl CompilationError {
    pub(crate) fn new(line: usize, message: impl Into<String>) -> Self {
        CompilationError {
            line,
            message: message.into(),
        }
    }
}
