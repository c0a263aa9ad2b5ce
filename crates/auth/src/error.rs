use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Credentials were rejected locally, before any request was made.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The persisted session could not be read or written.
    #[error("session storage failed: {0}")]
    Storage(#[from] StoreError),
}
