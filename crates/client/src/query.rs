//! Query options and their serialization into the backend's nested
//! query-string convention.
//!
//! Nested keys are flattened with brackets (`filters[estado][$eq]=...`),
//! arrays are indexed (`sort[0]=...`), values are percent-encoded and keys are
//! left as-is.

use serde_json::{Map, Value};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Which published state of the records to return.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PublicationState {
    /// Published records only.
    Live,
    /// Drafts as well.
    Preview,
}

impl PublicationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationState::Live => "live",
            PublicationState::Preview => "preview",
        }
    }
}

/// Filter operators understood by the backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Contains,
    ContainsI,
    Null,
    NotNull,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "$eq",
            FilterOp::Ne => "$ne",
            FilterOp::Lt => "$lt",
            FilterOp::Lte => "$lte",
            FilterOp::Gt => "$gt",
            FilterOp::Gte => "$gte",
            FilterOp::In => "$in",
            FilterOp::NotIn => "$notIn",
            FilterOp::Contains => "$contains",
            FilterOp::ContainsI => "$containsi",
            FilterOp::Null => "$null",
            FilterOp::NotNull => "$notNull",
        }
    }
}

impl core::str::FromStr for FilterOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = s.trim().trim_start_matches('$');
        Ok(match op.to_lowercase().as_str() {
            "eq" => FilterOp::Eq,
            "ne" => FilterOp::Ne,
            "lt" => FilterOp::Lt,
            "lte" => FilterOp::Lte,
            "gt" => FilterOp::Gt,
            "gte" => FilterOp::Gte,
            "in" => FilterOp::In,
            "notin" => FilterOp::NotIn,
            "contains" => FilterOp::Contains,
            "containsi" => FilterOp::ContainsI,
            "null" => FilterOp::Null,
            "notnull" => FilterOp::NotNull,
            other => return Err(format!("unknown filter operator '{other}'")),
        })
    }
}

/// Relation expansion.
#[derive(Debug, Clone, PartialEq)]
pub enum Populate {
    /// Every first-level relation (`populate=*`).
    All,
    /// The named relations.
    Fields(Vec<String>),
    /// An arbitrary nested populate object.
    Tree(Value),
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub start: Option<u64>,
    pub limit: Option<u64>,
}

/// Options accepted by `find` / `find_one`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pub sort: Vec<String>,
    pub filters: Map<String, Value>,
    pub populate: Option<Populate>,
    pub fields: Vec<String>,
    pub pagination: Option<PaginationParams>,
    pub publication_state: Option<PublicationState>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(mut self, field: &str, order: SortOrder) -> Self {
        self.sort.push(format!("{field}:{}", order.as_str()));
        self
    }

    /// Add a filter on a field. Dotted paths reach into relations
    /// (`marca.nombre`). A later filter on the same path and operator wins.
    pub fn filter(mut self, path: &str, op: FilterOp, value: impl Into<Value>) -> Self {
        insert_filter(&mut self.filters, path, op, value.into());
        self
    }

    /// Merge a raw filter object.
    pub fn filters(mut self, filters: Map<String, Value>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn populate(mut self, populate: Populate) -> Self {
        self.populate = Some(populate);
        self
    }

    pub fn populate_all(self) -> Self {
        self.populate(Populate::All)
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn page(mut self, page: u64, page_size: u64) -> Self {
        self.pagination = Some(PaginationParams {
            page: Some(page),
            page_size: Some(page_size),
            ..PaginationParams::default()
        });
        self
    }

    pub fn offset(mut self, start: u64, limit: u64) -> Self {
        self.pagination = Some(PaginationParams {
            start: Some(start),
            limit: Some(limit),
            ..PaginationParams::default()
        });
        self
    }

    pub fn publication_state(mut self, state: PublicationState) -> Self {
        self.publication_state = Some(state);
        self
    }

    /// Nested representation, mirroring the backend's documented query object.
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();

        match self.sort.as_slice() {
            [] => {}
            [single] => {
                root.insert("sort".into(), Value::String(single.clone()));
            }
            many => {
                root.insert("sort".into(), Value::from(many.to_vec()));
            }
        }

        if !self.filters.is_empty() {
            root.insert("filters".into(), Value::Object(self.filters.clone()));
        }

        match &self.populate {
            None => {}
            Some(Populate::All) => {
                root.insert("populate".into(), Value::String("*".into()));
            }
            Some(Populate::Fields(fields)) => {
                root.insert("populate".into(), Value::from(fields.clone()));
            }
            Some(Populate::Tree(tree)) => {
                root.insert("populate".into(), tree.clone());
            }
        }

        if !self.fields.is_empty() {
            root.insert("fields".into(), Value::from(self.fields.clone()));
        }

        if let Some(p) = &self.pagination {
            let mut pagination = Map::new();
            let entries = [
                ("page", p.page),
                ("pageSize", p.page_size),
                ("start", p.start),
                ("limit", p.limit),
            ];
            for (key, value) in entries {
                if let Some(v) = value {
                    pagination.insert(key.into(), Value::from(v));
                }
            }
            root.insert("pagination".into(), Value::Object(pagination));
        }

        if let Some(state) = self.publication_state {
            root.insert(
                "publicationState".into(),
                Value::String(state.as_str().into()),
            );
        }

        Value::Object(root)
    }

    /// Encoded query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        encode_query(&self.to_value())
    }
}

fn insert_filter(filters: &mut Map<String, Value>, path: &str, op: FilterOp, value: Value) {
    let mut node = filters;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        let entry = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(map) = entry else {
            return;
        };
        node = map;
    }
    node.insert(op.as_str().to_string(), value);
}

/// Flatten a nested value into `key=value` pairs joined by `&`.
pub fn encode_query(value: &Value) -> String {
    let mut pairs = Vec::new();
    if let Value::Object(map) = value {
        for (key, v) in map {
            flatten(key.clone(), v, &mut pairs);
        }
    }
    pairs
        .into_iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(&v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn flatten(prefix: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                flatten(format!("{prefix}[{key}]"), v, out);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten(format!("{prefix}[{i}]"), v, out);
            }
        }
        Value::Null => out.push((prefix, String::new())),
        Value::Bool(b) => out.push((prefix, b.to_string())),
        Value::Number(n) => out.push((prefix, n.to_string())),
        Value::String(s) => out.push((prefix, s.clone())),
    }
}
