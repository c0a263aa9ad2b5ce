//! Auth session: the credential every request carries and the identity behind
//! it.
//!
//! The session is shared between the HTTP client (reads the credential, forces
//! a logout on auth rejection), the login flow (writes it) and the route guard
//! (rehydrates and reads it).

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::AuthError;
use crate::store::{SessionStore, TOKEN_KEY, USER_KEY};
use crate::user::User;

/// Current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No personal session. May still hold the static fallback credential.
    Anonymous { fallback_token: Option<String> },
    /// A personal session obtained by logging in.
    Authenticated { token: String, user: Option<User> },
}

impl SessionState {
    /// Credential to attach to requests, personal or fallback.
    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Anonymous { fallback_token } => fallback_token.as_deref(),
            SessionState::Authenticated { token, .. } => Some(token),
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Anonymous { .. } => None,
            SessionState::Authenticated { user, .. } => user.as_ref(),
        }
    }

    /// A credential of any kind is present.
    pub fn has_credential(&self) -> bool {
        self.token().is_some()
    }

    /// A personal (logged-in) session is present.
    pub fn has_user_session(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}

/// Shared session context.
pub struct Session {
    store: Arc<dyn SessionStore>,
    fallback_token: Option<String>,
    state: RwLock<SessionState>,
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("has_fallback_token", &self.fallback_token.is_some())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create an anonymous session. Call [`Session::initialize`] to pick up a
    /// persisted credential, or use [`Session::open`].
    pub fn new(store: Arc<dyn SessionStore>, fallback_token: Option<String>) -> Self {
        let fallback_token = fallback_token.filter(|t| !t.trim().is_empty());
        Self {
            store,
            state: RwLock::new(SessionState::Anonymous {
                fallback_token: fallback_token.clone(),
            }),
            fallback_token,
        }
    }

    /// Create a session and rehydrate it from storage.
    pub async fn open(
        store: Arc<dyn SessionStore>,
        fallback_token: Option<String>,
    ) -> Result<Self, AuthError> {
        let session = Self::new(store, fallback_token);
        session.initialize().await?;
        Ok(session)
    }

    /// Rehydrate from persisted storage.
    ///
    /// Idempotent; called on startup and before every navigation so that a
    /// credential changed by someone else is observed.
    pub async fn initialize(&self) -> Result<(), AuthError> {
        let token = self
            .store
            .get(TOKEN_KEY)
            .await?
            .filter(|t| !t.is_empty());

        let next = match token {
            Some(token) => {
                let user = match self.store.get(USER_KEY).await? {
                    Some(raw) => match serde_json::from_str::<User>(&raw) {
                        Ok(user) => Some(user),
                        Err(e) => {
                            tracing::warn!("ignoring unreadable persisted user: {}", e);
                            None
                        }
                    },
                    None => None,
                };
                SessionState::Authenticated { token, user }
            }
            None => SessionState::Anonymous {
                fallback_token: self.fallback_token.clone(),
            },
        };

        *self.state.write().await = next;
        Ok(())
    }

    /// Store a freshly issued credential and identity.
    pub async fn set_credentials(&self, token: String, user: User) -> Result<(), AuthError> {
        let serialized = serde_json::to_string(&user)
            .map_err(|e| crate::store::StoreError::Backend(e.to_string()))?;
        self.store.set(TOKEN_KEY, &token).await?;
        self.store.set(USER_KEY, &serialized).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "session started");
        *self.state.write().await = SessionState::Authenticated {
            token,
            user: Some(user),
        };
        Ok(())
    }

    /// Drop the personal session, keeping the fallback credential.
    ///
    /// The in-memory state is reset before storage is touched, so the session
    /// is anonymous even if clearing storage fails.
    pub async fn clear_credentials(&self) -> Result<(), AuthError> {
        *self.state.write().await = SessionState::Anonymous {
            fallback_token: self.fallback_token.clone(),
        };
        tracing::info!("session cleared");

        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await?;
        Ok(())
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token().map(str::to_string)
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user().cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.has_credential()
    }

    /// Admin affordances: the `admin` user, or any deployment configured with
    /// a fallback service credential.
    pub async fn is_admin(&self) -> bool {
        if self.fallback_token.is_some() {
            return true;
        }
        self.state
            .read()
            .await
            .user()
            .is_some_and(User::is_admin)
    }

    pub fn fallback_token(&self) -> Option<&str> {
        self.fallback_token.as_deref()
    }
}
