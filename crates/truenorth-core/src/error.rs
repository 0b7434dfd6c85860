//! Error types for TrueNorth Core
//!
//! This module defines all error types used throughout the alignment engine.
//! We use `thiserror` for ergonomic error definitions with automatic Display/Error implementations.
//!
//! Propagation policy: scoring failures are always recoverable (the aggregator
//! substitutes a heuristic result), while structural data violations are
//! rejected synchronously at construction. Nothing in this crate panics past
//! its public API.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Scoring-related errors
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// Structural data violations
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        /// Human-readable context describing the failed operation
        context: String,
        /// Underlying error
        source: Box<EngineError>,
    },
}

/// Errors from the model-backed scoring path
///
/// Every variant is recoverable: the aggregator degrades to the heuristic
/// scorer instead of surfacing these as hard failures.
#[derive(Error, Debug, Clone)]
pub enum ScoringError {
    /// The completion service could not be reached or returned garbage
    #[error("Scoring service unavailable: {0}")]
    Unavailable(String),

    /// The scoring call exceeded its deadline
    #[error("Scoring timed out after {0}ms")]
    Timeout(u64),
}

/// Errors from record construction and validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Milestone weight outside the accepted range
    #[error("Milestone weight must be in range [1, 5], got {0}")]
    InvalidMilestoneWeight(i64),

    /// A required title was empty or whitespace-only
    #[error("Title must not be empty")]
    EmptyTitle,
}

impl EngineError {
    /// Add context to an error
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add lazy context to a Result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err = ScoringError::Unavailable("connection refused".to_string());
        let err = EngineError::from(err);
        let err = err.context("Failed to score task");

        assert!(err.to_string().contains("Failed to score task"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(ValidationError::EmptyTitle.into());
        let result = result.context("Goal validation failed");

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Goal validation failed"));
    }

    #[test]
    fn test_invalid_weight_message() {
        let err = ValidationError::InvalidMilestoneWeight(0);
        assert!(err.to_string().contains("[1, 5]"));
        assert!(err.to_string().contains('0'));
    }
}
