//! Login flow against `/api/auth/local`.

use autocatalog_auth::{AuthError, Credentials, LoginRejection, User};
use serde::Deserialize;
use serde_json::json;

use crate::error::ClientError;
use crate::http::ApiClient;

const LOGIN_PATH: &str = "/api/auth/local";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    jwt: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

/// Login and logout over the shared client and session.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a personal session.
    ///
    /// On failure the session stays as it was and the operator message is
    /// published to the error channel, replacing whatever the request hook
    /// published for the same response.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<User, ClientError> {
        let credentials = match Credentials::new(identifier, password) {
            Ok(c) => c,
            Err(e) => return Err(self.reject_locally(e)),
        };

        let body = json!({
            "identifier": credentials.identifier(),
            "password": credentials.password(),
        });

        let response = match self.client.post_json(LOGIN_PATH, &body).await {
            Ok(value) => value,
            Err(err) => {
                let rejection = match &err {
                    ClientError::Api { name, message, .. } => {
                        LoginRejection::from_backend(name.as_deref(), Some(message.as_str()))
                    }
                    _ => LoginRejection::Other,
                };
                tracing::warn!(
                    identifier = credentials.identifier(),
                    status = ?err.status(),
                    "login rejected: {}",
                    err
                );
                return Err(self.reject(rejection));
            }
        };

        let parsed: LoginResponse = serde_json::from_value(response)
            .map_err(|_| self.reject(LoginRejection::InvalidResponse))?;
        let (Some(jwt), Some(user)) = (parsed.jwt.filter(|t| !t.is_empty()), parsed.user) else {
            return Err(self.reject(LoginRejection::InvalidResponse));
        };

        self.client
            .session()
            .set_credentials(jwt, user.clone())
            .await?;
        self.client.signals().clear_error();
        Ok(user)
    }

    /// End the personal session. The fallback credential, if any, stays.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.client.session().clear_credentials().await?;
        Ok(())
    }

    pub async fn current_user(&self) -> Option<User> {
        self.client.session().user().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated().await
    }

    pub async fn is_admin(&self) -> bool {
        self.client.session().is_admin().await
    }

    fn reject(&self, rejection: LoginRejection) -> ClientError {
        self.client.signals().publish_error(rejection.user_message());
        ClientError::LoginRejected(rejection)
    }

    fn reject_locally(&self, err: AuthError) -> ClientError {
        let err = ClientError::Auth(err);
        self.client.signals().publish_error(err.user_message());
        err
    }
}
