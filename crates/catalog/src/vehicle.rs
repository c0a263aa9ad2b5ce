use autocatalog_core::{DocumentId, EntityId};
use serde::{Deserialize, Serialize};

use crate::brand::Brand;
use crate::collection::impl_collection;
use crate::media::Media;
use crate::nullable::or_default;
use crate::timestamps::Timestamps;

/// Sale status of a listed vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Disponible,
    Vendido,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Disponible => "disponible",
            VehicleStatus::Vendido => "vendido",
        }
    }
}

/// Listed vehicle (`vehiculos`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: EntityId,
    #[serde(default)]
    pub document_id: Option<DocumentId>,
    #[serde(default, deserialize_with = "or_default")]
    pub modelo: String,
    /// Model year.
    #[serde(default)]
    pub ano: Option<i32>,
    #[serde(default)]
    pub kilometraje: Option<u64>,
    #[serde(default)]
    pub precio: Option<f64>,
    #[serde(default, deserialize_with = "or_default")]
    pub descripcion: String,
    #[serde(default)]
    pub estado: Option<VehicleStatus>,
    #[serde(default)]
    pub marca: Option<Brand>,
    #[serde(default)]
    pub imagenes: Option<Vec<Media>>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Vehicle {
    pub fn is_available(&self) -> bool {
        self.estado == Some(VehicleStatus::Disponible)
    }

    /// Brand name, when the relation was populated.
    pub fn brand_name(&self) -> Option<&str> {
        self.marca.as_ref().map(|b| b.nombre.as_str())
    }
}

impl_collection!(Vehicle, "vehiculos");
