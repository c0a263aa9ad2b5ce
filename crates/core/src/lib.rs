//! `autocatalog-core`: catalog foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every other crate
//! (no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod messages;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{DocumentId, EntityId};
