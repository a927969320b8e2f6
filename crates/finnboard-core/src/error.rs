//! Error types for finnboard-core
//!
//! The query engine itself cannot fail. Errors here come from loading and
//! converting records, and from lookups by id.

use finnboard_source::SourceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Records not loaded yet
    NotLoaded,
    /// Record source failed
    SourceError,
    /// Row could not be converted into a typed record
    InvalidFormat,
    /// Transaction not found
    TransactionNotFound,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::SourceError => write!(f, "SOURCE_ERROR"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Severity of the failure
    pub severity: ErrorSeverity,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String, severity: ErrorSeverity) -> Self {
        Self {
            code,
            message,
            severity,
            suggestions: vec![],
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for finnboard-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Records not loaded")]
    NotLoaded,

    #[error("Record source error: {message}")]
    SourceError { message: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: u64 },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::SourceError { .. } => ErrorCode::SourceError,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            CoreError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoaded => ErrorSeverity::Warning,
            CoreError::SourceError { .. } => ErrorSeverity::Error,
            CoreError::InvalidFormat { .. } => ErrorSeverity::Error,
            CoreError::TransactionNotFound { .. } => ErrorSeverity::Info,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string(), self.severity());

        match self {
            CoreError::SourceError { .. } => {
                details = details.with_suggestion(
                    "Check that data.path and data.transactions_file point to a readable file.".to_string(),
                );
            }
            CoreError::InvalidFormat { .. } => {
                details = details.with_suggestion(
                    "Dates use YYYY-MM-DD; categories, accounts and statuses must use the known labels."
                        .to_string(),
                );
            }
            CoreError::TransactionNotFound { .. } => {
                details = details.with_suggestion(
                    "Use the /api/transactions endpoint to list all transactions.".to_string(),
                );
            }
            CoreError::NotLoaded => {}
        }

        details
    }
}

impl From<SourceError> for CoreError {
    fn from(error: SourceError) -> Self {
        CoreError::SourceError {
            message: error.to_string(),
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
