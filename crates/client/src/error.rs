//! Client error taxonomy.

use autocatalog_auth::{AuthError, LoginRejection};
use autocatalog_core::{DomainError, messages};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally before any request was sent (missing identifiers,
    /// empty credentials, not-found lookups).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The server answered with an error status.
    #[error("{message}")]
    Api {
        status: u16,
        name: Option<String>,
        message: String,
        details: Option<Value>,
    },

    /// The server answered with an error status and no error envelope.
    #[error("error status {status}: {reason}")]
    Status { status: u16, reason: String },

    /// The server answered 401/403; the session has been torn down.
    #[error("session rejected by server ({status}): {message}")]
    SessionExpired { status: u16, message: String },

    /// The request was sent but no response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request could not be constructed.
    #[error("request configuration error: {0}")]
    Configuration(String),

    /// The response body did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),

    /// The login endpoint refused the credentials.
    #[error("{}", .0.user_message())]
    LoginRejected(LoginRejection),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. }
            | ClientError::Status { status, .. }
            | ClientError::SessionExpired { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Domain(DomainError::NotFound(_)))
            || self.status() == Some(404)
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired { .. })
    }

    /// Text suitable for the operator.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Domain(e) => e.user_message(),
            ClientError::Api { status, message, .. } => format!("[{status}] {message}"),
            ClientError::Status { status, reason } => format!("Error {status}: {reason}"),
            ClientError::SessionExpired { .. } => messages::SESSION_EXPIRED.to_string(),
            ClientError::Transport(_) => messages::SERVER_UNREACHABLE.to_string(),
            ClientError::Configuration(msg) if msg.trim().is_empty() => {
                messages::REQUEST_CONFIGURATION.to_string()
            }
            ClientError::Configuration(msg) => msg.clone(),
            ClientError::Decode(_) => messages::UNEXPECTED_ERROR.to_string(),
            ClientError::LoginRejected(rejection) => rejection.user_message(),
            ClientError::Auth(AuthError::InvalidCredentials(msg)) => msg.clone(),
            ClientError::Auth(e) => e.to_string(),
        }
    }
}
