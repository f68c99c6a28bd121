//! Errors produced by the pure calculators
//!
//! Every variant is deterministic given its inputs; none are retryable.

use thiserror::Error;

/// Core computation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Input rejected before any computation, with the offending field
    #[error("invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    /// Aggregation was asked to summarise zero forecasts
    #[error("cannot aggregate an empty forecast set")]
    EmptyForecastSet,
}

impl CoreError {
    /// Shorthand for an [`CoreError::InvalidInput`] on the given field
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

/// Result type alias for the calculators
pub type CoreResult<T> = Result<T, CoreError>;
