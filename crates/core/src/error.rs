//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures detected before any request is
/// sent (validation, missing identifiers). Transport concerns belong to the
/// client crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty credentials).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A record has no document identifier, so it cannot be mutated.
    #[error("missing document identifier: {0}")]
    MissingDocumentId(String),

    /// A requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn missing_document_id(msg: impl Into<String>) -> Self {
        Self::MissingDocumentId(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Human readable text for the UI error channel.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::InvalidId(msg)
            | Self::MissingDocumentId(msg)
            | Self::NotFound(msg) => msg.clone(),
        }
    }
}
