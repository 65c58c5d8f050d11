//! Error types for pgstring

use thiserror::Error;

/// Result type alias for pgstring operations
pub type PgResult<T> = Result<T, PgStringError>;

/// Errors raised while deriving metadata or assembling a statement.
///
/// A statement keeps the first error it hits and carries it to
/// [`Statement::build`](crate::Statement::build), so an error never ends up
/// inside the generated SQL text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PgStringError {
    /// An operation that needs a record (or a record type) received
    /// something else.
    #[error("{operation}: only record types are supported, found {found}")]
    UnsupportedInput {
        operation: &'static str,
        found: String,
    },

    /// A `@name` placeholder has no value in the binding table.
    #[error("Unbound parameter: @{0}")]
    UnboundParameter(String),
}

impl PgStringError {
    /// Create an unsupported input error for an operation
    pub fn unsupported(operation: &'static str, found: impl Into<String>) -> Self {
        Self::UnsupportedInput {
            operation,
            found: found.into(),
        }
    }

    /// Check if this is an unsupported input error
    pub fn is_unsupported_input(&self) -> bool {
        matches!(self, Self::UnsupportedInput { .. })
    }

    /// Check if this is an unbound parameter error
    pub fn is_unbound_parameter(&self) -> bool {
        matches!(self, Self::UnboundParameter(_))
    }
}
