//! Error types for pbQL.

use thiserror::Error;

/// The main error type for pbQL operations.
#[derive(Debug, Error)]
pub enum PbqlError {
    /// The query text violates the grammar. Both numbers are 1-based.
    #[error("SyntaxError: Unexpected token at {line}:{column}")]
    Syntax { line: usize, column: usize },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PbqlError {
    /// Create a syntax error from a 0-based statement index and a 0-based
    /// character offset within that statement.
    pub fn syntax(statement: usize, offset: usize) -> Self {
        Self::Syntax {
            line: statement + 1,
            column: offset + 1,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The 1-based `(line, column)` of a syntax error.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Syntax { line, column } => Some((*line, *column)),
            _ => None,
        }
    }
}

/// Result type alias for pbQL operations.
pub type PbqlResult<T> = Result<T, PbqlError>;
