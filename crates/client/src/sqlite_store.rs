//! SQLite-backed session storage.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use autocatalog_auth::{SessionStore, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tokio::sync::Mutex;

const DB_FILE: &str = "session.db";
const APP_DIR: &str = "autocatalog";

/// Persists the session keys in a small SQLite database.
///
/// The connection is opened lazily on first use, so constructing a store
/// never touches the filesystem.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    url: String,
    /// Parent directory to create before connecting, when file-backed.
    dir: Option<PathBuf>,
    pool: Arc<Mutex<Option<SqlitePool>>>,
}

impl SqliteStore {
    /// Store backed by `path`. Missing parent directories are created on first
    /// use.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            url: format!("sqlite://{}", path.to_string_lossy()),
            dir: path.parent().map(Path::to_path_buf),
            pool: Arc::new(Mutex::new(None)),
        }
    }

    /// Store that lives as long as this handle (and its clones).
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            dir: None,
            pool: Arc::new(Mutex::new(None)),
        }
    }

    /// Store under `state_dir`, or under the OS data directory when unset.
    pub fn in_dir(state_dir: Option<&Path>) -> Result<Self, StoreError> {
        let dir = match state_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_dir()?,
        };
        Ok(Self::new(dir.join(DB_FILE)))
    }

    async fn pool(&self) -> Result<SqlitePool, StoreError> {
        let mut guard = self.pool.lock().await;
        if let Some(pool) = guard.as_ref() {
            return Ok(pool.clone());
        }

        if let Some(dir) = &self.dir {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                StoreError::Unavailable(format!("cannot create {}: {}", dir.display(), e))
            })?;
        }

        let options = SqliteConnectOptions::from_str(&self.url)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .create_if_missing(true);

        // A single connection that never idles out, so an in-memory database
        // survives for the life of the store.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", self.url, e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session_state (
                key   TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(backend)?;

        tracing::debug!(url = %self.url, "session store ready");
        *guard = Some(pool.clone());
        Ok(pool)
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn default_dir() -> Result<PathBuf, StoreError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| StoreError::Unavailable("no data directory for this platform".into()))
}

#[async_trait]
impl SessionStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT value FROM session_state WHERE key = ?")
            .bind(key)
            .fetch_optional(&pool)
            .await
            .map_err(backend)?;

        row.map(|r| r.try_get::<String, _>("value"))
            .transpose()
            .map_err(backend)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        sqlx::query(
            r#"
            INSERT INTO session_state (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        sqlx::query("DELETE FROM session_state WHERE key = ?")
            .bind(key)
            .execute(&pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
