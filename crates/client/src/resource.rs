//! Generic CRUD adapter over one backend collection.

use core::marker::PhantomData;

use autocatalog_catalog::Collection;
use autocatalog_core::{DocumentId, DomainError, EntityId, messages};
use serde_json::{Map, Value};

use crate::envelope::{Page, normalize_optional_record, normalize_page, normalize_record};
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::payload::Payload;
use crate::query::{FilterOp, PublicationState, QueryParams};

/// The five record operations for collection `T`.
///
/// Obtained from [`ApiClient::resource`] or one of the typed shorthands
/// ([`ApiClient::vehicles`], ...).
pub struct Resource<T> {
    client: ApiClient,
    segment: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            segment: self.segment,
            _marker: PhantomData,
        }
    }
}

impl<T> core::fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Resource")
            .field("segment", &self.segment)
            .finish()
    }
}

impl<T: Collection> Resource<T> {
    pub(crate) fn new(client: ApiClient, segment: &'static str) -> Self {
        Self {
            client,
            segment,
            _marker: PhantomData,
        }
    }

    pub fn segment(&self) -> &'static str {
        self.segment
    }

    fn collection_path(&self) -> String {
        format!("/api/{}", self.segment)
    }

    fn document_path(&self, document_id: &DocumentId) -> String {
        format!(
            "/api/{}/{}",
            self.segment,
            urlencoding::encode(document_id.as_str())
        )
    }

    /// List records. Pagination metadata is passed through as the server
    /// reported it.
    pub async fn find(&self, params: &QueryParams) -> Result<Page<T>, ClientError> {
        let query = params.to_query_string();
        let path = if query.is_empty() {
            self.collection_path()
        } else {
            format!("{}?{}", self.collection_path(), query)
        };

        let body = self.client.get_json(&path).await?;
        normalize_page(body)
    }

    /// Fetch a single record by numeric id, drafts included.
    ///
    /// Any caller filter on `id` is replaced by the equality filter.
    pub async fn find_one(&self, id: EntityId, params: QueryParams) -> Result<T, ClientError> {
        let mut params = params.publication_state(PublicationState::Preview);
        let mut id_filter = Map::new();
        id_filter.insert(FilterOp::Eq.as_str().to_string(), Value::from(id.get()));
        params
            .filters
            .insert("id".to_string(), Value::Object(id_filter));

        let page = self.find(&params).await?;
        match page.data.into_iter().next() {
            Some(record) => Ok(record),
            None => {
                tracing::warn!(segment = self.segment, %id, "no record matched id");
                Err(DomainError::not_found(messages::item_not_found(id)).into())
            }
        }
    }

    /// Create a record from the payload's set fields.
    pub async fn create(&self, payload: &Payload) -> Result<T, ClientError> {
        let body = self
            .client
            .post_json(&self.collection_path(), &payload.to_body())
            .await?;
        normalize_record(body)
    }

    /// Update the record addressed by `document_id`. Fails without sending
    /// anything when the identifier is empty.
    pub async fn update(&self, document_id: &DocumentId, payload: &Payload) -> Result<T, ClientError> {
        if document_id.is_empty() {
            return Err(DomainError::missing_document_id(
                messages::DOCUMENT_ID_REQUIRED_FOR_UPDATE,
            )
            .into());
        }

        let body = self
            .client
            .put_json(&self.document_path(document_id), &payload.to_body())
            .await?;
        normalize_record(body)
    }

    /// Delete the record addressed by `document_id`. Returns the deleted
    /// record when the server echoes it back.
    pub async fn delete(&self, document_id: &DocumentId) -> Result<Option<T>, ClientError> {
        if document_id.is_empty() {
            return Err(DomainError::missing_document_id(
                messages::DOCUMENT_ID_REQUIRED_FOR_DELETE,
            )
            .into());
        }

        let body = self
            .client
            .delete_json(&self.document_path(document_id))
            .await?;
        normalize_optional_record(body)
    }

    /// Update a record previously fetched from the server.
    pub async fn update_entity(&self, record: &T, payload: &Payload) -> Result<T, ClientError> {
        let document_id = record.require_document_id()?;
        self.update(document_id, payload).await
    }

    pub async fn delete_entity(&self, record: &T) -> Result<Option<T>, ClientError> {
        let document_id = record.require_document_id()?;
        self.delete(document_id).await
    }
}
