//! Media descriptors returned by the upload endpoint and embedded in records.

use autocatalog_core::{DocumentId, EntityId};
use serde::{Deserialize, Serialize};

/// A stored file, as the backend returns it (flattened).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<DocumentId>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    /// Size in kilobytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formats: Option<MediaFormats>,
}

/// Resized renditions generated by the backend for images.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaFormats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<MediaFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<MediaFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<MediaFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<MediaFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFormat {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Media {
    /// Smallest rendition available, falling back to the original file.
    pub fn thumbnail_url(&self) -> &str {
        self.formats
            .as_ref()
            .and_then(|f| f.thumbnail.as_ref().or(f.small.as_ref()))
            .map(|f| f.url.as_str())
            .unwrap_or(&self.url)
    }
}
