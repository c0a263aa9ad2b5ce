//! Create/update payloads.
//!
//! Form screens leave fields the operator never touched marked as
//! [`FieldValue::Unset`]; those are stripped before sending because the
//! backend rejects explicit absence markers for some field types. An explicit
//! JSON `null` is a real value (e.g. clearing a relation) and is sent.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// No value: dropped from the transmitted body.
    Unset,
    Value(Value),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: BTreeMap<String, FieldValue>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any serializable struct or map. Every top-level field,
    /// including `null`s, is kept.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, ClientError> {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Ok(map.into_iter().collect()),
            Ok(other) => Err(ClientError::Configuration(format!(
                "payload must be an object, got {other}"
            ))),
            Err(e) => Err(ClientError::Configuration(e.to_string())),
        }
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields
            .insert(key.into(), FieldValue::Value(value.into()));
        self
    }

    pub fn null(self, key: impl Into<String>) -> Self {
        self.set(key, Value::Null)
    }

    pub fn unset(mut self, key: impl Into<String>) -> Self {
        self.fields.insert(key.into(), FieldValue::Unset);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields that will actually be sent.
    pub fn cleaned(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter_map(|(k, v)| match v {
                FieldValue::Unset => None,
                FieldValue::Value(value) => Some((k.clone(), value.clone())),
            })
            .collect()
    }

    /// Request body: the cleaned fields wrapped under `data`.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("data".to_string(), Value::Object(self.cleaned()));
        Value::Object(body)
    }
}

impl FromIterator<(String, Value)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k, FieldValue::Value(v)))
                .collect(),
        }
    }
}
