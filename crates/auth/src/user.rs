//! Identity of the operator behind a personal session.

use autocatalog_core::EntityId;
use serde::{Deserialize, Serialize};

/// Username that unlocks admin-level affordances.
pub const ADMIN_USERNAME: &str = "admin";

/// User identity returned by the login endpoint and persisted with the
/// session credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.username == ADMIN_USERNAME
    }
}
