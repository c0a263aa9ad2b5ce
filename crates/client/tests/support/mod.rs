//! In-process stand-in for the content API.
//!
//! Implements just enough of the backend's REST conventions for black-box
//! tests: list/create/update/delete under `/api/:resource`, the local login
//! endpoint, and multipart uploads. Requests need either the service token or
//! a JWT signed with the server secret.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

pub const JWT_SECRET: &str = "test-secret";
pub const SERVICE_TOKEN: &str = "service-token";
pub const PASSWORD: &str = "secret";

/// Resource whose mutations are forbidden to everyone.
pub const READ_ONLY_RESOURCE: &str = "locked";
/// Resource that always fails with a non-envelope 500.
pub const BROKEN_RESOURCE: &str = "broken";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: u64,
    exp: i64,
}

struct Account {
    id: u64,
    username: &'static str,
    email: &'static str,
    confirmed: bool,
}

const ACCOUNTS: &[Account] = &[
    Account {
        id: 1,
        username: "user",
        email: "user@x.com",
        confirmed: true,
    },
    Account {
        id: 2,
        username: "pending",
        email: "pending@x.com",
        confirmed: false,
    },
    Account {
        id: 3,
        username: "admin",
        email: "admin@x.com",
        confirmed: true,
    },
];

#[derive(Default)]
pub struct FakeCms {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    next_id: AtomicU64,
    hits: AtomicUsize,
    last_body: Mutex<Option<Value>>,
    last_authorization: Mutex<Option<String>>,
    scripted_login: Mutex<Option<(StatusCode, Value)>>,
    upload_stores_nothing: Mutex<bool>,
    reported_total: Mutex<Option<u64>>,
}

impl FakeCms {
    /// Number of requests that reached the server.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.last_authorization.lock().unwrap().clone()
    }

    /// Answer every login with `body` instead of checking credentials.
    pub fn script_login(&self, status: StatusCode, body: Value) {
        *self.scripted_login.lock().unwrap() = Some((status, body));
    }

    pub fn set_upload_stores_nothing(&self, value: bool) {
        *self.upload_stores_nothing.lock().unwrap() = value;
    }

    /// Report `total` in list pagination instead of the number of matches.
    pub fn report_total(&self, total: u64) {
        *self.reported_total.lock().unwrap() = Some(total);
    }

    /// Insert records, filling in ids and timestamps when absent. A record
    /// with `"publishedAt": null` stays a draft.
    pub fn seed(&self, resource: &str, records: Vec<Value>) -> Vec<Value> {
        let mut stored = Vec::new();
        let mut collections = self.collections.lock().unwrap();
        let entries = collections.entry(resource.to_string()).or_default();
        for record in records {
            let Value::Object(fields) = record else {
                panic!("seed records must be objects");
            };
            let record = self.stamp(fields);
            entries.push(record.clone());
            stored.push(record);
        }
        stored
    }

    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.collections
            .lock()
            .unwrap()
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    fn stamp(&self, mut fields: Map<String, Value>) -> Value {
        let now = Value::String(Utc::now().to_rfc3339());
        if !fields.contains_key("id") {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            fields.insert("id".into(), json!(id));
        }
        if !fields.contains_key("documentId") {
            fields.insert(
                "documentId".into(),
                json!(uuid::Uuid::now_v7().simple().to_string()),
            );
        }
        fields.entry("createdAt").or_insert_with(|| now.clone());
        fields.entry("updatedAt").or_insert_with(|| now.clone());
        fields.entry("publishedAt").or_insert(now);
        Value::Object(fields)
    }

    fn hit(&self, headers: &HeaderMap) {
        self.hits.fetch_add(1, Ordering::SeqCst);
        *self.last_authorization.lock().unwrap() = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        match token {
            None => Err(error(StatusCode::FORBIDDEN, "ForbiddenError", "Forbidden")),
            Some(t) if t == SERVICE_TOKEN => Ok(()),
            Some(t) => jsonwebtoken::decode::<Claims>(
                t,
                &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
                &Validation::new(Algorithm::HS256),
            )
            .map(|_| ())
            .map_err(|_| {
                error(
                    StatusCode::UNAUTHORIZED,
                    "UnauthorizedError",
                    "Missing or invalid credentials",
                )
            }),
        }
    }
}

pub fn mint_jwt(user_id: u64) -> String {
    let claims = Claims {
        id: user_id,
        exp: (Utc::now() + ChronoDuration::minutes(10)).timestamp(),
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn error(status: StatusCode, name: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "data": null,
            "error": {
                "status": status.as_u16(),
                "name": name,
                "message": message,
                "details": {}
            }
        })),
    )
        .into_response()
}

fn parse_query(raw: Option<&str>) -> Vec<(String, String)> {
    raw.unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_default();
            (key.to_string(), value)
        })
        .collect()
}

fn scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field_matches(record: &Value, field: &str, op: &str, expected: &str) -> bool {
    let actual = scalar(record.get(field));
    match op {
        "$eq" => actual.as_deref() == Some(expected),
        "$ne" => actual.as_deref() != Some(expected),
        "$containsi" => actual.is_some_and(|a| a.to_lowercase().contains(&expected.to_lowercase())),
        _ => true,
    }
}

/// Keep only `id`, `documentId` and the selected attributes.
fn select_fields(record: Value, fields: &[String]) -> Value {
    if fields.is_empty() {
        return record;
    }
    let Value::Object(all) = record else {
        return record;
    };
    let kept = all
        .into_iter()
        .filter(|(key, _)| key == "id" || key == "documentId" || fields.contains(key))
        .collect();
    Value::Object(kept)
}

async fn list(
    State(cms): State<Arc<FakeCms>>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    cms.hit(&headers);
    if resource == BROKEN_RESOURCE {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    if let Err(rejection) = cms.authorize(&headers) {
        return rejection;
    }

    let pairs = parse_query(query.as_deref());
    let mut filters = Vec::new();
    let mut fields = Vec::new();
    let mut page = 1u64;
    let mut page_size = 25u64;
    let mut preview = false;

    for (key, value) in &pairs {
        if let Some(rest) = key.strip_prefix("filters[") {
            let parts: Vec<&str> = rest.trim_end_matches(']').split("][").collect();
            if let [field, op] = parts.as_slice() {
                filters.push((field.to_string(), op.to_string(), value.clone()));
            }
        } else if key.starts_with("fields[") {
            fields.push(value.clone());
        } else if key == "pagination[page]" {
            page = value.parse().unwrap_or(1).max(1);
        } else if key == "pagination[pageSize]" {
            page_size = value.parse().unwrap_or(25).max(1);
        } else if key == "publicationState" {
            preview = value == "preview";
        }
    }

    let matching: Vec<Value> = cms
        .records(&resource)
        .into_iter()
        .filter(|r| preview || !r.get("publishedAt").is_none_or(Value::is_null))
        .filter(|r| {
            filters
                .iter()
                .all(|(field, op, value)| field_matches(r, field, op, value))
        })
        .collect();

    let total = cms
        .reported_total
        .lock()
        .unwrap()
        .unwrap_or(matching.len() as u64);
    let data: Vec<Value> = matching
        .into_iter()
        .skip(((page - 1) * page_size) as usize)
        .take(page_size as usize)
        .map(|record| select_fields(record, &fields))
        .collect();

    Json(json!({
        "data": data,
        "meta": {
            "pagination": {
                "page": page,
                "pageSize": page_size,
                "pageCount": total.div_ceil(page_size),
                "total": total
            }
        }
    }))
    .into_response()
}

async fn create(
    State(cms): State<Arc<FakeCms>>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    cms.hit(&headers);
    *cms.last_body.lock().unwrap() = Some(body.clone());
    if let Err(rejection) = cms.authorize(&headers) {
        return rejection;
    }
    if resource == READ_ONLY_RESOURCE {
        return error(StatusCode::FORBIDDEN, "ForbiddenError", "Forbidden");
    }

    let Some(Value::Object(data)) = body.get("data").cloned() else {
        return error(
            StatusCode::BAD_REQUEST,
            "ValidationError",
            "Missing \"data\" payload in the request body",
        );
    };

    let record = cms.stamp(data);
    cms.collections
        .lock()
        .unwrap()
        .entry(resource)
        .or_default()
        .push(record.clone());

    (StatusCode::CREATED, Json(json!({ "data": record, "meta": {} }))).into_response()
}

async fn update(
    State(cms): State<Arc<FakeCms>>,
    Path((resource, document_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    cms.hit(&headers);
    *cms.last_body.lock().unwrap() = Some(body.clone());
    if let Err(rejection) = cms.authorize(&headers) {
        return rejection;
    }
    if resource == READ_ONLY_RESOURCE {
        return error(StatusCode::FORBIDDEN, "ForbiddenError", "Forbidden");
    }
    let Some(Value::Object(changes)) = body.get("data").cloned() else {
        return error(
            StatusCode::BAD_REQUEST,
            "ValidationError",
            "Missing \"data\" payload in the request body",
        );
    };

    let mut collections = cms.collections.lock().unwrap();
    let records = collections.entry(resource).or_default();
    let Some(record) = records
        .iter_mut()
        .find(|r| r.get("documentId").and_then(Value::as_str) == Some(document_id.as_str()))
    else {
        return error(StatusCode::NOT_FOUND, "NotFoundError", "Not Found");
    };

    if let Value::Object(fields) = record {
        fields.extend(changes);
        fields.insert("updatedAt".into(), json!(Utc::now().to_rfc3339()));
    }
    Json(json!({ "data": record.clone(), "meta": {} })).into_response()
}

async fn remove(
    State(cms): State<Arc<FakeCms>>,
    Path((resource, document_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    cms.hit(&headers);
    if let Err(rejection) = cms.authorize(&headers) {
        return rejection;
    }
    if resource == READ_ONLY_RESOURCE {
        return error(StatusCode::FORBIDDEN, "ForbiddenError", "Forbidden");
    }

    let mut collections = cms.collections.lock().unwrap();
    let records = collections.entry(resource).or_default();
    let before = records.len();
    records.retain(|r| r.get("documentId").and_then(Value::as_str) != Some(document_id.as_str()));
    if records.len() == before {
        return error(StatusCode::NOT_FOUND, "NotFoundError", "Not Found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn login(
    State(cms): State<Arc<FakeCms>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    cms.hit(&headers);
    *cms.last_body.lock().unwrap() = Some(body.clone());

    if let Some((status, scripted)) = cms.scripted_login.lock().unwrap().clone() {
        return (status, Json(scripted)).into_response();
    }

    let identifier = body.get("identifier").and_then(Value::as_str).unwrap_or_default();
    let password = body.get("password").and_then(Value::as_str).unwrap_or_default();

    let Some(account) = ACCOUNTS
        .iter()
        .find(|a| a.email == identifier || a.username == identifier)
        .filter(|_| password == PASSWORD)
    else {
        return error(
            StatusCode::BAD_REQUEST,
            "ValidationError",
            "Invalid identifier or password",
        );
    };
    if !account.confirmed {
        return error(
            StatusCode::BAD_REQUEST,
            "ValidationError",
            "Please confirm your email address",
        );
    }

    Json(json!({
        "jwt": mint_jwt(account.id),
        "user": {
            "id": account.id,
            "username": account.username,
            "email": account.email,
            "confirmed": true,
            "blocked": false
        }
    }))
    .into_response()
}

async fn upload(
    State(cms): State<Arc<FakeCms>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    cms.hit(&headers);
    if let Err(rejection) = cms.authorize(&headers) {
        return rejection;
    }

    let mut stored = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() != Some("files") {
            return error(StatusCode::BAD_REQUEST, "ValidationError", "Files are empty");
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let mime = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap();
        let id = cms.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        stored.push(json!({
            "id": id,
            "documentId": uuid::Uuid::now_v7().simple().to_string(),
            "name": name,
            "url": format!("/uploads/{name}"),
            "mime": mime,
            "size": bytes.len() as f64 / 1000.0
        }));
    }

    if *cms.upload_stores_nothing.lock().unwrap() {
        stored.clear();
    }
    Json(Value::Array(stored)).into_response()
}

pub struct TestServer {
    pub base_url: String,
    pub cms: Arc<FakeCms>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let cms = Arc::new(FakeCms::default());
        let app = Router::new()
            .route("/api/auth/local", post(login))
            .route("/api/upload", post(upload))
            .route("/api/:resource", get(list).post(create))
            .route("/api/:resource/:document_id", put(update).delete(remove))
            .with_state(cms.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            cms,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
