//! Backend response envelopes and the normalization applied to them.
//!
//! The backend is inconsistent about wrapping: list endpoints usually answer
//! `{data: [...], meta}` but may return a bare array, and mutation endpoints
//! answer either a bare record or `{data: record}`. Every adapter operation
//! funnels its body through the functions here so nothing above this module
//! depends on either shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// One page of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Pagination metadata as the backend reports it, either page-based or
/// offset-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Page<T> {
    pub fn total(&self) -> Option<u64> {
        self.meta.pagination.as_ref().map(|p| p.total)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// `{error: {...}}` body returned on failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    /// Parse an error body, tolerating anything that is not the envelope.
    pub fn parse(body: &str) -> Option<ApiErrorBody> {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|e| e.error)
    }
}

/// Pick the record out of a single-record body: the nested `data` when it is
/// present and non-null, otherwise the body itself.
pub fn unwrap_record(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(data) => {
                map.insert("data".to_string(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Decode a single-record body into `T`.
pub fn normalize_record<T: DeserializeOwned>(body: Value) -> Result<T, ClientError> {
    serde_json::from_value(unwrap_record(body)).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Decode a body that may carry no record at all (e.g. `204 No Content`).
pub fn normalize_optional_record<T: DeserializeOwned>(
    body: Value,
) -> Result<Option<T>, ClientError> {
    match unwrap_record(body) {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        value => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ClientError::Decode(e.to_string())),
    }
}

/// Decode a list body (bare array or `{data: [...], meta}`) into a page.
pub fn normalize_page<T: DeserializeOwned>(body: Value) -> Result<Page<T>, ClientError> {
    match body {
        Value::Array(items) => {
            let data = items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<T>, _>>()
                .map_err(|e| ClientError::Decode(e.to_string()))?;
            Ok(Page {
                data,
                meta: PageMeta::default(),
            })
        }
        Value::Object(map) if map.get("data").is_some_and(Value::is_array) => {
            serde_json::from_value(Value::Object(map))
                .map_err(|e| ClientError::Decode(e.to_string()))
        }
        other => Err(ClientError::Decode(format!(
            "expected a list of records, got {}",
            describe(&other)
        ))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Rec {
        id: u64,
        #[serde(rename = "documentId")]
        document_id: String,
    }

    #[test]
    fn record_prefers_nested_data() {
        let rec: Rec =
            normalize_record(json!({ "data": { "id": 1, "documentId": "a" }, "meta": {} }))
                .unwrap();
        assert_eq!(rec, Rec { id: 1, document_id: "a".into() });
    }

    #[test]
    fn record_accepts_flat_body() {
        let rec: Rec = normalize_record(json!({ "id": 2, "documentId": "b" })).unwrap();
        assert_eq!(rec.id, 2);
    }

    #[test]
    fn null_data_falls_back_to_raw_body() {
        assert_eq!(
            unwrap_record(json!({ "data": null, "id": 3 })),
            json!({ "data": null, "id": 3 })
        );
    }

    #[test]
    fn optional_record_handles_empty_bodies() {
        assert_eq!(normalize_optional_record::<Rec>(Value::Null).unwrap(), None);
        assert_eq!(
            normalize_optional_record::<Rec>(json!({ "data": { "id": 4, "documentId": "d" } }))
                .unwrap()
                .map(|r| r.id),
            Some(4)
        );
    }

    #[test]
    fn page_accepts_envelope_and_bare_array() {
        let page: Page<Rec> = normalize_page(json!({
            "data": [{ "id": 1, "documentId": "a" }],
            "meta": { "pagination": { "page": 1, "pageSize": 25, "pageCount": 1, "total": 1 } }
        }))
        .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.total(), Some(1));
        assert_eq!(page.meta.pagination.unwrap().page_size, Some(25));

        let bare: Page<Rec> = normalize_page(json!([{ "id": 2, "documentId": "b" }])).unwrap();
        assert_eq!(bare.data.len(), 1);
        assert_eq!(bare.total(), None);
    }

    #[test]
    fn page_rejects_non_list_bodies() {
        assert!(matches!(
            normalize_page::<Rec>(json!({ "data": { "id": 1 } })),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn wrong_record_shape_is_a_decode_error() {
        assert!(matches!(
            normalize_record::<Rec>(json!({ "data": { "name": "x" } })),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn error_envelope_parsing_is_lenient() {
        let body = ErrorEnvelope::parse(
            r#"{"data":null,"error":{"status":400,"name":"ValidationError","message":"Invalid identifier or password","details":{}}}"#,
        )
        .unwrap();
        assert_eq!(body.status, Some(400));
        assert_eq!(body.name.as_deref(), Some("ValidationError"));
        assert!(ErrorEnvelope::parse("<html>Bad gateway</html>").is_none());
    }
}
