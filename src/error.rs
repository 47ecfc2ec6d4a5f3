//! Custom error types for compliance-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for compliance-cli operations
#[derive(Error, Debug)]
pub enum ComplianceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// A period selection that does not fit the branch's audit frequency
    #[error("Invalid selection for {frequency} frequency: {reason}")]
    InvalidSelection {
        frequency: &'static str,
        reason: String,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A combined submission already exists for the period
    #[error("A combined submission for period {period} already exists for branch '{branch}'")]
    AlreadySubmitted { branch: String, period: String },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ComplianceError {
    /// Create a "not found" error for branches
    pub fn branch_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Branch",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for submissions
    pub fn submission_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Submission",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidSelection { .. })
    }
}

impl From<std::io::Error> for ComplianceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<crate::models::PeriodParseError> for ComplianceError {
    fn from(err: crate::models::PeriodParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for ComplianceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for compliance-cli operations
pub type ComplianceResult<T> = Result<T, ComplianceError>;
