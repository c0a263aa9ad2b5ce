use autocatalog_core::{DocumentId, EntityId};
use serde::{Deserialize, Serialize};

use crate::collection::impl_collection;
use crate::nullable::or_default;
use crate::timestamps::Timestamps;

/// Article category (`categorias`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    #[serde(default)]
    pub document_id: Option<DocumentId>,
    #[serde(default, deserialize_with = "or_default")]
    pub nombre: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl_collection!(Category, "categorias");
