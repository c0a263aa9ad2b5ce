//! Entity trait: the shape contract every catalog record satisfies.

use crate::error::{DomainError, DomainResult};
use crate::id::{DocumentId, EntityId};
use crate::messages;

/// A flattened backend record.
///
/// Records carry two identities: the numeric id used for lookups and filters,
/// and the opaque document identifier the backend uses to address mutations.
pub trait Entity {
    /// Returns the numeric identifier.
    fn id(&self) -> EntityId;

    /// Returns the document identifier, if the backend sent one.
    fn document_id(&self) -> Option<&DocumentId>;

    /// Returns the document identifier or fails when it is absent or empty.
    fn require_document_id(&self) -> DomainResult<&DocumentId> {
        match self.document_id() {
            Some(doc) if !doc.is_empty() => Ok(doc),
            _ => Err(DomainError::missing_document_id(format!(
                "{} (id {})",
                messages::DOCUMENT_ID_REQUIRED,
                self.id()
            ))),
        }
    }
}
