//! `autocatalog-auth`: session state, credential rules and navigation policy.
//!
//! This crate is intentionally decoupled from HTTP: the client crate performs
//! the login request and reports the outcome here. Persistence goes through
//! the [`SessionStore`] trait.

pub mod error;
pub mod guard;
pub mod login;
pub mod routes;
pub mod session;
pub mod store;
pub mod user;

pub use error::AuthError;
pub use guard::{AccessPolicy, Navigation, RouteGuard, decide};
pub use login::{Credentials, LoginRejection};
pub use routes::{Route, Section};
pub use session::{Session, SessionState};
pub use store::{MemoryStore, SessionStore, StoreError, TOKEN_KEY, USER_KEY};
pub use user::User;
