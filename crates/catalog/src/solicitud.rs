use autocatalog_core::{DocumentId, EntityId};
use serde::{Deserialize, Serialize};

use crate::collection::impl_collection;
use crate::nullable::or_default;
use crate::timestamps::Timestamps;

/// Follow-up state of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    #[serde(rename = "Nueva")]
    Nueva,
    #[serde(rename = "En proceso")]
    EnProceso,
    #[serde(rename = "Resuelta")]
    Resuelta,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Nueva => "Nueva",
            LeadStatus::EnProceso => "En proceso",
            LeadStatus::Resuelta => "Resuelta",
        }
    }
}

/// Contact request submitted from the public site (`solicituds`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solicitud {
    pub id: EntityId,
    #[serde(default)]
    pub document_id: Option<DocumentId>,
    #[serde(default, deserialize_with = "or_default")]
    pub nombre: String,
    #[serde(default, deserialize_with = "or_default")]
    pub correo: String,
    #[serde(default, deserialize_with = "or_default")]
    pub telefono: String,
    #[serde(default, deserialize_with = "or_default")]
    pub mensaje: String,
    #[serde(default)]
    pub estado: Option<LeadStatus>,
    #[serde(default, rename = "fecha_creacion", skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl_collection!(Solicitud, "solicituds");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_status_uses_backend_labels() {
        let status: LeadStatus = serde_json::from_str("\"En proceso\"").unwrap();
        assert_eq!(status, LeadStatus::EnProceso);
        assert_eq!(serde_json::to_string(&LeadStatus::Nueva).unwrap(), "\"Nueva\"");
    }

    #[test]
    fn unset_lead_fields_arrive_as_null() {
        let lead: Solicitud = serde_json::from_value(serde_json::json!({
            "id": 7,
            "documentId": "s7",
            "nombre": "Ana",
            "correo": null,
            "estado": null,
            "publishedAt": null
        }))
        .unwrap();

        assert_eq!(lead.nombre, "Ana");
        assert!(lead.correo.is_empty());
        assert_eq!(lead.estado, None);
    }
}
