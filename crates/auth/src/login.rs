//! Credential rules and login failure wording.

use autocatalog_core::messages;

use crate::error::AuthError;

/// Error `name` the backend uses for rejected input.
pub const VALIDATION_ERROR_NAME: &str = "ValidationError";

const INVALID_IDENTIFIER_OR_PASSWORD: &str = "Invalid identifier or password";
const EMAIL_NOT_CONFIRMED: &str = "Please confirm your email address";

/// Locally validated login credentials.
///
/// The identifier is trimmed; the password is kept verbatim since surrounding
/// whitespace may be part of it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    identifier: String,
    password: String,
}

impl Credentials {
    pub fn new(identifier: &str, password: &str) -> Result<Self, AuthError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(AuthError::InvalidCredentials(
                messages::IDENTIFIER_REQUIRED.to_string(),
            ));
        }
        if password.trim().is_empty() {
            return Err(AuthError::InvalidCredentials(
                messages::PASSWORD_REQUIRED.to_string(),
            ));
        }
        Ok(Self {
            identifier: identifier.to_string(),
            password: password.to_string(),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Why the backend refused a login, in operator-facing terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginRejection {
    InvalidCredentials,
    EmailNotConfirmed,
    /// Any other validation error; carries the server's text.
    Validation(String),
    /// The success response carried no credential.
    InvalidResponse,
    /// Anything else (network, server error, unknown error shape).
    Other,
}

impl LoginRejection {
    /// Classify a backend error envelope (`name`, `message`).
    pub fn from_backend(name: Option<&str>, message: Option<&str>) -> Self {
        if name != Some(VALIDATION_ERROR_NAME) {
            return Self::Other;
        }
        match message.unwrap_or_default() {
            INVALID_IDENTIFIER_OR_PASSWORD => Self::InvalidCredentials,
            EMAIL_NOT_CONFIRMED => Self::EmailNotConfirmed,
            other => Self::Validation(other.to_string()),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials => messages::INVALID_CREDENTIALS.to_string(),
            Self::EmailNotConfirmed => messages::EMAIL_NOT_CONFIRMED.to_string(),
            Self::Validation(msg) => format!("{}{}", messages::VALIDATION_PREFIX, msg),
            Self::InvalidResponse => messages::INVALID_SERVER_RESPONSE.to_string(),
            Self::Other => messages::LOGIN_FAILED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_trimmed_but_password_is_not() {
        let creds = Credentials::new("  user@x.com ", " secret ").unwrap();
        assert_eq!(creds.identifier(), "user@x.com");
        assert_eq!(creds.password(), " secret ");
    }

    #[test]
    fn empty_identifier_or_password_is_rejected() {
        assert_eq!(
            Credentials::new("   ", "secret").unwrap_err(),
            AuthError::InvalidCredentials(messages::IDENTIFIER_REQUIRED.to_string())
        );
        assert_eq!(
            Credentials::new("user@x.com", "  ").unwrap_err(),
            AuthError::InvalidCredentials(messages::PASSWORD_REQUIRED.to_string())
        );
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = Credentials::new("user@x.com", "secret").unwrap();
        assert!(!format!("{creds:?}").contains("secret"));
    }

    #[test]
    fn known_validation_messages_are_localized() {
        let invalid = LoginRejection::from_backend(
            Some("ValidationError"),
            Some("Invalid identifier or password"),
        );
        assert_eq!(invalid, LoginRejection::InvalidCredentials);
        assert_eq!(invalid.user_message(), messages::INVALID_CREDENTIALS);

        let unconfirmed = LoginRejection::from_backend(
            Some("ValidationError"),
            Some("Please confirm your email address"),
        );
        assert_eq!(unconfirmed.user_message(), messages::EMAIL_NOT_CONFIRMED);
    }

    #[test]
    fn unknown_validation_message_is_echoed() {
        let rejection =
            LoginRejection::from_backend(Some("ValidationError"), Some("identifier is a required field"));
        assert_eq!(
            rejection.user_message(),
            "Error de validación: identifier is a required field"
        );
    }

    #[test]
    fn non_validation_errors_are_generic() {
        let rejection = LoginRejection::from_backend(Some("ApplicationError"), Some("boom"));
        assert_eq!(rejection, LoginRejection::Other);
        assert_eq!(LoginRejection::from_backend(None, None).user_message(), messages::LOGIN_FAILED);
    }
}
