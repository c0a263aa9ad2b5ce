//! Shared HTTP client and its request/response hooks.
//!
//! Every call to the content API goes through one dispatch path:
//!
//! - outbound: attach the session credential as a bearer token, raise the busy
//!   signal for anything that is not a read
//! - inbound: lower the busy signal, classify failures, tear the session down
//!   on 401/403, publish the operator message, hand the error back

use std::sync::Arc;

use autocatalog_auth::Session;
use autocatalog_catalog::{Article, Brand, Category, Collection, Solicitud, Vehicle};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::auth::AuthService;
use crate::config::ClientConfig;
use crate::envelope::ErrorEnvelope;
use crate::error::ClientError;
use crate::resource::Resource;
use crate::signals::UiSignals;
use crate::upload::Uploader;

enum Body<'a> {
    Empty,
    Json(&'a Value),
    Multipart(Form),
}

struct Inner {
    /// Client carrying the JSON content type by default.
    http: reqwest::Client,
    /// Client with no default headers, so multipart bodies set their own
    /// boundary.
    raw: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
    signals: UiSignals,
}

/// Handle to the content API. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl core::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<Session>,
        signals: UiSignals,
    ) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;
        let raw = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                raw,
                base_url,
                session,
                signals,
            }),
        })
    }

    pub fn from_config(
        config: &ClientConfig,
        session: Arc<Session>,
        signals: UiSignals,
    ) -> Result<Self, ClientError> {
        Self::new(config.api_url.clone(), session, signals)
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.inner.session
    }

    pub fn signals(&self) -> &UiSignals {
        &self.inner.signals
    }

    /// CRUD adapter for any collection type.
    pub fn resource<T: Collection>(&self) -> Resource<T> {
        Resource::new(self.clone(), T::SEGMENT)
    }

    pub fn vehicles(&self) -> Resource<Vehicle> {
        self.resource()
    }

    pub fn brands(&self) -> Resource<Brand> {
        self.resource()
    }

    pub fn categories(&self) -> Resource<Category> {
        self.resource()
    }

    pub fn articles(&self) -> Resource<Article> {
        self.resource()
    }

    pub fn solicitudes(&self) -> Resource<Solicitud> {
        self.resource()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.clone())
    }

    pub fn uploads(&self) -> Uploader {
        Uploader::new(self.clone())
    }

    pub async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        self.dispatch(Method::GET, path, Body::Empty).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.dispatch(Method::POST, path, Body::Json(body)).await
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.dispatch(Method::PUT, path, Body::Json(body)).await
    }

    pub async fn delete_json(&self, path: &str) -> Result<Value, ClientError> {
        self.dispatch(Method::DELETE, path, Body::Empty).await
    }

    /// POST a multipart form without the JSON default content type.
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Value, ClientError> {
        self.dispatch(Method::POST, path, Body::Multipart(form)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Body<'_>,
    ) -> Result<Value, ClientError> {
        let url = self.url(path);
        let mut request: RequestBuilder = match body {
            Body::Empty => self.inner.http.request(method.clone(), &url),
            Body::Json(json) => self.inner.http.request(method.clone(), &url).json(json),
            Body::Multipart(form) => self.inner.raw.request(method.clone(), &url).multipart(form),
        };

        if let Some(token) = self.inner.session.token().await {
            request = request.bearer_auth(token);
        }

        let mutating = method != Method::GET;
        if mutating {
            self.inner.signals.set_busy(true);
        }
        tracing::debug!(%method, %url, "sending request");

        let outcome = exchange(request).await;
        self.inner.signals.set_busy(false);

        match outcome {
            Ok(value) => Ok(value),
            Err(err) => Err(self.handle_failure(&method, &url, err).await),
        }
    }

    async fn handle_failure(&self, method: &Method, url: &str, err: ClientError) -> ClientError {
        if err.is_session_expired() {
            if let Err(e) = self.inner.session.clear_credentials().await {
                tracing::error!("failed to clear session after auth rejection: {}", e);
            }
        }

        // A body that failed to decode came with a success status; nothing
        // to tell the operator beyond what the caller reports.
        if matches!(err, ClientError::Decode(_)) {
            tracing::warn!(%method, %url, "undecodable response: {}", err);
        } else {
            tracing::warn!(%method, %url, status = ?err.status(), "request failed: {}", err);
            self.inner.signals.publish_error(err.user_message());
        }
        err
    }
}

async fn exchange(request: RequestBuilder) -> Result<Value, ClientError> {
    let response = request.send().await.map_err(classify_send_error)?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(classify_status(status, &text));
    }
    parse_body(&text)
}

fn classify_send_error(err: reqwest::Error) -> ClientError {
    if err.is_builder() {
        ClientError::Configuration(err.to_string())
    } else {
        ClientError::Transport(err.to_string())
    }
}

/// Turn an error response into a [`ClientError`].
pub(crate) fn classify_status(status: StatusCode, body: &str) -> ClientError {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
    let envelope = ErrorEnvelope::parse(body);

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let message = envelope.and_then(|e| e.message).unwrap_or(reason);
        return ClientError::SessionExpired {
            status: code,
            message,
        };
    }

    match envelope {
        Some(error) => ClientError::Api {
            status: error.status.unwrap_or(code),
            name: error.name,
            message: error.message.unwrap_or(reason),
            details: error.details,
        },
        None => ClientError::Status {
            status: code,
            reason,
        },
    }
}

fn parse_body(text: &str) -> Result<Value, ClientError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ClientError::Decode(e.to_string()))
}
