use autocatalog_core::{DocumentId, EntityId};
use serde::{Deserialize, Serialize};

use crate::collection::impl_collection;
use crate::media::Media;
use crate::nullable::or_default;
use crate::timestamps::Timestamps;

/// Vehicle brand (`marcas`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: EntityId,
    #[serde(default)]
    pub document_id: Option<DocumentId>,
    #[serde(default, deserialize_with = "or_default")]
    pub nombre: String,
    #[serde(default)]
    pub logo: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modelo: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl_collection!(Brand, "marcas");
