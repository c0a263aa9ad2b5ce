//! Mapping between record types and their backend collections.

use core::str::FromStr;

use autocatalog_core::{DomainError, Entity};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record type that lives in a backend collection.
pub trait Collection: Entity + DeserializeOwned + Serialize + Send + Sync + 'static {
    /// Path segment under `/api/` (e.g. `vehiculos`).
    const SEGMENT: &'static str;
}

/// Every collection the console manages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Vehicles,
    Brands,
    Categories,
    Articles,
    Solicitudes,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 5] = [
        CollectionKind::Vehicles,
        CollectionKind::Brands,
        CollectionKind::Categories,
        CollectionKind::Articles,
        CollectionKind::Solicitudes,
    ];

    /// Backend path segment.
    pub fn segment(&self) -> &'static str {
        match self {
            CollectionKind::Vehicles => "vehiculos",
            CollectionKind::Brands => "marcas",
            CollectionKind::Categories => "categorias",
            CollectionKind::Articles => "articulos",
            CollectionKind::Solicitudes => "solicituds",
        }
    }

    /// Heading shown above list screens.
    pub fn label(&self) -> &'static str {
        match self {
            CollectionKind::Vehicles => "VEHICULOS",
            CollectionKind::Brands => "MARCAS",
            CollectionKind::Categories => "CATEGORIAS",
            CollectionKind::Articles => "ARTICULOS",
            CollectionKind::Solicitudes => "SOLICITUDES",
        }
    }

    /// Leads arrive from the public site; the console updates and deletes
    /// them but never creates them.
    pub fn can_create(&self) -> bool {
        !matches!(self, CollectionKind::Solicitudes)
    }
}

impl core::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for CollectionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vehicles" | "vehiculos" => Ok(CollectionKind::Vehicles),
            "brands" | "marcas" => Ok(CollectionKind::Brands),
            "categories" | "categorias" => Ok(CollectionKind::Categories),
            "articles" | "articulos" => Ok(CollectionKind::Articles),
            "solicitudes" | "solicituds" | "leads" => Ok(CollectionKind::Solicitudes),
            other => Err(DomainError::validation(format!(
                "unknown collection '{other}' (expected one of: vehicles, brands, categories, articles, solicitudes)"
            ))),
        }
    }
}

/// Implements [`Entity`] and [`Collection`] for a record with `id` and
/// `document_id` fields.
macro_rules! impl_collection {
    ($t:ty, $segment:literal) => {
        impl autocatalog_core::Entity for $t {
            fn id(&self) -> autocatalog_core::EntityId {
                self.id
            }

            fn document_id(&self) -> Option<&autocatalog_core::DocumentId> {
                self.document_id.as_ref()
            }
        }

        impl $crate::collection::Collection for $t {
            const SEGMENT: &'static str = $segment;
        }
    };
}

pub(crate) use impl_collection;
