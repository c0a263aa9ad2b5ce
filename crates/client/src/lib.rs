//! `autocatalog-client`
//!
//! **Responsibility:** everything that talks to the content API.
//!
//! This crate provides:
//! - A shared HTTP client with outbound/inbound hooks (bearer credential, busy
//!   signal, failure classification, forced logout on auth rejection)
//! - A generic CRUD adapter ([`Resource`]) over any [`autocatalog_core::Entity`]
//! - Query-string serialization and response normalization
//! - The login flow and the multipart upload path
//! - A SQLite-backed [`autocatalog_auth::SessionStore`]

pub mod auth;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod payload;
pub mod query;
pub mod resource;
pub mod signals;
pub mod sqlite_store;
pub mod state;
pub mod upload;

pub use auth::AuthService;
pub use config::{ClientConfig, ConfigError};
pub use envelope::{Page, PageMeta, Pagination};
pub use error::ClientError;
pub use http::ApiClient;
pub use payload::{FieldValue, Payload};
pub use query::{FilterOp, Populate, PublicationState, QueryParams, SortOrder};
pub use resource::Resource;
pub use signals::{UiEvent, UiSignals};
pub use sqlite_store::SqliteStore;
pub use state::AppState;
pub use upload::{UploadFile, Uploader};
