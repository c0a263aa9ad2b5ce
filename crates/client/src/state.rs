//! Wiring of the shared context: session, signals, client and guard.

use std::sync::Arc;

use autocatalog_auth::{RouteGuard, Session, SessionStore};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::signals::UiSignals;
use crate::sqlite_store::SqliteStore;

/// Everything a presentation layer needs, built once per process.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub session: Arc<Session>,
    pub signals: UiSignals,
    pub client: ApiClient,
    pub guard: RouteGuard,
}

impl AppState {
    /// Build the context over `store` and rehydrate the session from it.
    pub async fn build(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, ClientError> {
        let session = Arc::new(Session::open(store, config.api_token.clone()).await?);
        let signals = UiSignals::new(config.error_ttl);
        let client = ApiClient::from_config(&config, session.clone(), signals.clone())?;
        let guard = RouteGuard::new(session.clone(), config.access_policy);

        tracing::debug!(
            api_url = %config.api_url,
            policy = ?config.access_policy,
            fallback = config.api_token.is_some(),
            "client context ready"
        );

        Ok(Self {
            config,
            session,
            signals,
            client,
            guard,
        })
    }

    /// Build the context with the SQLite store under the configured state
    /// directory.
    pub async fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let store = SqliteStore::in_dir(config.state_dir.as_deref())
            .map_err(autocatalog_auth::AuthError::from)?;
        Self::build(config, Arc::new(store)).await
    }
}
