//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use autocatalog_auth::AccessPolicy;
use thiserror::Error;

pub const ENV_API_URL: &str = "AUTOCATALOG_API_URL";
pub const ENV_API_TOKEN: &str = "AUTOCATALOG_API_TOKEN";
pub const ENV_ERROR_TTL_SECS: &str = "AUTOCATALOG_ERROR_TTL_SECS";
pub const ENV_STATE_DIR: &str = "AUTOCATALOG_STATE_DIR";
pub const ENV_ACCESS_POLICY: &str = "AUTOCATALOG_ACCESS_POLICY";

/// How long an error message stays visible before it clears itself.
pub const DEFAULT_ERROR_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the content API (no trailing `/api`).
    pub api_url: String,
    /// Static fallback service credential.
    pub api_token: Option<String>,
    /// `None` keeps errors until they are cleared explicitly.
    pub error_ttl: Option<Duration>,
    /// Where the persisted session lives. Defaults to the OS data directory.
    pub state_dir: Option<PathBuf>,
    pub access_policy: AccessPolicy,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Result<Self, ConfigError> {
        let api_url = api_url.into().trim().trim_end_matches('/').to_string();
        reqwest::Url::parse(&api_url).map_err(|e| ConfigError::Invalid {
            var: ENV_API_URL,
            reason: e.to_string(),
        })?;

        Ok(Self {
            api_url,
            api_token: None,
            error_ttl: Some(DEFAULT_ERROR_TTL),
            state_dir: None,
            access_policy: AccessPolicy::default(),
        })
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.api_token = (!token.trim().is_empty()).then_some(token);
        self
    }

    pub fn with_error_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.error_ttl = ttl;
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(dir.into());
        self
    }

    pub fn with_access_policy(mut self, policy: AccessPolicy) -> Self {
        self.access_policy = policy;
        self
    }

    /// Load from `AUTOCATALOG_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(ENV_API_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(ENV_API_URL))?;
        let mut config = Self::new(api_url)?;

        if let Some(token) = lookup(ENV_API_TOKEN) {
            config = config.with_api_token(token);
        }

        if let Some(raw) = lookup(ENV_ERROR_TTL_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: ENV_ERROR_TTL_SECS,
                reason: e.to_string(),
            })?;
            config.error_ttl = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(dir) = lookup(ENV_STATE_DIR).filter(|v| !v.trim().is_empty()) {
            config.state_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup(ENV_ACCESS_POLICY) {
            config.access_policy = raw
                .parse::<AccessPolicy>()
                .map_err(|reason| ConfigError::Invalid {
                    var: ENV_ACCESS_POLICY,
                    reason,
                })?;
        }

        Ok(config)
    }
}
