//! Command execution. Every command passes through the route guard first.

use anyhow::{Context, bail};
use autocatalog_auth::{Navigation, Route, SessionState};
use autocatalog_catalog::{Collection, CollectionKind};
use autocatalog_client::{
    ApiClient, AppState, ClientError, Payload, QueryParams, Resource, UploadFile,
};
use autocatalog_core::EntityId;
use serde::Serialize;
use serde_json::{Value, json};
use tokio::io::AsyncBufReadExt;

use crate::cli::Command;
use crate::input::{payload_from_args, query_from_args, section_for};

/// What a command prints on success.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Json(Value),
    Text(String),
}

impl core::fmt::Display for Output {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Output::Json(value) => match serde_json::to_string_pretty(value) {
                Ok(text) => f.write_str(&text),
                Err(_) => write!(f, "{value}"),
            },
            Output::Text(text) => f.write_str(text),
        }
    }
}

enum RecordOp {
    List(QueryParams),
    Show(EntityId),
    Create(Payload),
    Update(EntityId, Payload),
    Delete(EntityId),
}

pub async fn execute(state: &AppState, command: Command) -> anyhow::Result<Output> {
    match command {
        Command::Login {
            identifier,
            password,
            force,
        } => login(state, &identifier, password, force).await,
        Command::Logout => {
            state.client.auth().logout().await?;
            let landing = state.guard.before_each(Route::Login).await;
            Ok(Output::Text(format!(
                "session closed; now at {}",
                landing.destination().path()
            )))
        }
        Command::Whoami => whoami(state).await,
        Command::Open { path } => {
            let navigation = state.guard.navigate(&path).await;
            let route = navigation.destination();
            let text = match &navigation {
                Navigation::Allow(_) => format!("{} {}", route.path(), route.name()),
                Navigation::Redirect { from, to } => format!(
                    "{} redirected to {} {}",
                    from.path(),
                    to.path(),
                    to.name()
                ),
            };
            Ok(Output::Text(text))
        }
        Command::List(args) => {
            enter(state, Route::List(section_for(args.collection))).await?;
            let params = query_from_args(&args)?;
            records(state, args.collection, RecordOp::List(params)).await
        }
        Command::Show { collection, id } => {
            enter(state, detail_route(collection, id)).await?;
            records(state, collection, RecordOp::Show(id)).await
        }
        Command::Create { collection, fields } => {
            ensure_creatable(collection)?;
            enter(state, Route::New(section_for(collection))).await?;
            let payload = payload_from_args(&fields)?;
            records(state, collection, RecordOp::Create(payload)).await
        }
        Command::Update {
            collection,
            id,
            fields,
        } => {
            enter(state, detail_route(collection, id)).await?;
            let payload = payload_from_args(&fields)?;
            records(state, collection, RecordOp::Update(id, payload)).await
        }
        Command::Delete { collection, id } => {
            enter(state, Route::List(section_for(collection))).await?;
            records(state, collection, RecordOp::Delete(id)).await
        }
        Command::Upload { files } => {
            enter(state, Route::Dashboard).await?;
            let mut uploads = Vec::with_capacity(files.len());
            for path in &files {
                let file = UploadFile::from_path(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?;
                uploads.push(file);
            }
            let stored = state.client.uploads().upload(uploads).await?;
            Ok(Output::Json(to_json(&stored)?))
        }
    }
}

/// Run the guard for `route`; a redirect to login aborts the command.
async fn enter(state: &AppState, route: Route) -> anyhow::Result<Route> {
    match state.guard.before_each(route).await {
        Navigation::Allow(route) => Ok(route),
        Navigation::Redirect {
            from,
            to: Route::Login,
        } => bail!(
            "{} ({}) requires a session; run `autocatalog login` first",
            from.name(),
            from.path()
        ),
        Navigation::Redirect { to, .. } => Ok(to),
    }
}

fn detail_route(kind: CollectionKind, id: EntityId) -> Route {
    let section = section_for(kind);
    if section.has_forms() {
        Route::Edit(section, id)
    } else {
        Route::List(section)
    }
}

fn ensure_creatable(kind: CollectionKind) -> anyhow::Result<()> {
    if !kind.can_create() {
        bail!("{} cannot be created from the console", kind.label());
    }
    Ok(())
}

async fn login(
    state: &AppState,
    identifier: &str,
    password: Option<String>,
    force: bool,
) -> anyhow::Result<Output> {
    if let Navigation::Redirect { .. } = state.guard.before_each(Route::Login).await {
        if !force {
            return Ok(Output::Text(
                "a session is already active; use --force to log in again".to_string(),
            ));
        }
    }

    let password = match password {
        Some(p) => p,
        None => read_password().await?,
    };
    let user = state.client.auth().login(identifier, &password).await?;
    let landing = state.guard.before_each(Route::Dashboard).await;

    Ok(Output::Text(format!(
        "logged in as {} (id {}); now at {}",
        user.username,
        user.id,
        landing.destination().path()
    )))
}

async fn read_password() -> anyhow::Result<String> {
    let mut line = String::new();
    tokio::io::BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn whoami(state: &AppState) -> anyhow::Result<Output> {
    let navigation = state.guard.before_each(Route::Dashboard).await;
    let identity = match state.session.snapshot().await {
        SessionState::Authenticated {
            user: Some(user), ..
        } => json!({
            "kind": "user",
            "id": user.id,
            "username": user.username,
            "email": user.email,
        }),
        SessionState::Authenticated { user: None, .. } => json!({ "kind": "user", "username": null }),
        SessionState::Anonymous {
            fallback_token: Some(_),
        } => json!({ "kind": "service" }),
        SessionState::Anonymous {
            fallback_token: None,
        } => json!({ "kind": "anonymous" }),
    };

    Ok(Output::Json(json!({
        "identity": identity,
        "admin": state.session.is_admin().await,
        "policy": format!("{:?}", state.guard.policy()),
        "home": navigation.destination().path(),
    })))
}

async fn records(
    state: &AppState,
    kind: CollectionKind,
    op: RecordOp,
) -> anyhow::Result<Output> {
    let value = apply_to(&state.client, kind, op).await?;
    Ok(Output::Json(value))
}

async fn apply_to(
    client: &ApiClient,
    kind: CollectionKind,
    op: RecordOp,
) -> Result<Value, ClientError> {
    match kind {
        CollectionKind::Vehicles => apply(client.vehicles(), op).await,
        CollectionKind::Brands => apply(client.brands(), op).await,
        CollectionKind::Categories => apply(client.categories(), op).await,
        CollectionKind::Articles => apply(client.articles(), op).await,
        CollectionKind::Solicitudes => apply(client.solicitudes(), op).await,
    }
}

async fn apply<T: Collection>(resource: Resource<T>, op: RecordOp) -> Result<Value, ClientError> {
    match op {
        RecordOp::List(params) => to_json(&resource.find(&params).await?),
        RecordOp::Show(id) => to_json(&resource.find_one(id, QueryParams::new()).await?),
        RecordOp::Create(payload) => to_json(&resource.create(&payload).await?),
        RecordOp::Update(id, payload) => {
            let current = resource.find_one(id, QueryParams::new()).await?;
            to_json(&resource.update_entity(&current, &payload).await?)
        }
        RecordOp::Delete(id) => {
            let current = resource.find_one(id, QueryParams::new()).await?;
            match resource.delete_entity(&current).await? {
                Some(deleted) => to_json(&deleted),
                None => to_json(&current),
            }
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ClientError> {
    serde_json::to_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}
