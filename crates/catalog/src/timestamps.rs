use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bookkeeping timestamps the backend attaches to every record.
///
/// `published_at` is `None` for drafts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Timestamps {
    pub fn is_draft(&self) -> bool {
        self.published_at.is_none()
    }
}
