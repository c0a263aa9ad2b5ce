use autocatalog_core::{DocumentId, EntityId};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::collection::impl_collection;
use crate::media::Media;
use crate::nullable::or_default;
use crate::timestamps::Timestamps;

/// Blog/news article (`articulos`).
///
/// `fecha_publicacion` is the editorial date chosen by the author and is kept
/// as the backend sends it; it is unrelated to `timestamps.published_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: EntityId,
    #[serde(default)]
    pub document_id: Option<DocumentId>,
    #[serde(default, deserialize_with = "or_default")]
    pub titulo: String,
    #[serde(default, deserialize_with = "or_default")]
    pub contenido: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, rename = "fecha_publicacion")]
    pub fecha_publicacion: Option<String>,
    #[serde(default, rename = "imagen_portada")]
    pub imagen_portada: Option<Media>,
    #[serde(default)]
    pub categoria: Option<Category>,
    #[serde(default, deserialize_with = "or_default")]
    pub autor: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl_collection!(Article, "articulos");
