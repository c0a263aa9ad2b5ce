//! Turning command-line arguments into queries, payloads and routes.

use anyhow::{Context, bail};
use autocatalog_auth::Section;
use autocatalog_catalog::CollectionKind;
use autocatalog_client::{FilterOp, Payload, PublicationState, QueryParams, SortOrder};
use serde_json::Value;

use crate::cli::{FieldArgs, ListArgs};

/// Console section that hosts a collection's screens.
pub fn section_for(kind: CollectionKind) -> Section {
    match kind {
        CollectionKind::Vehicles => Section::Vehicles,
        CollectionKind::Brands => Section::Brands,
        CollectionKind::Categories => Section::Categories,
        CollectionKind::Articles => Section::Articles,
        CollectionKind::Solicitudes => Section::Solicitudes,
    }
}

/// JSON when it parses, a plain string otherwise.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn split_assignment(raw: &str) -> anyhow::Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => bail!("expected field=value, got '{raw}'"),
    }
}

/// `field=value` or `field:$op=value`.
pub fn parse_filter(raw: &str) -> anyhow::Result<(String, FilterOp, Value)> {
    let (lhs, value) = split_assignment(raw)?;
    let (field, op) = match lhs.split_once(':') {
        Some((field, op)) => (
            field,
            op.parse::<FilterOp>().map_err(anyhow::Error::msg)?,
        ),
        None => (lhs, FilterOp::Eq),
    };
    Ok((field.to_string(), op, parse_value(value)))
}

pub fn query_from_args(args: &ListArgs) -> anyhow::Result<QueryParams> {
    let mut params = QueryParams::new();

    for raw in &args.filters {
        let (field, op, value) = parse_filter(raw)?;
        params = params.filter(&field, op, value);
    }
    for raw in &args.sort {
        params = match raw.split_once(':') {
            Some((field, "desc")) => params.sort(field, SortOrder::Desc),
            Some((field, "asc")) => params.sort(field, SortOrder::Asc),
            Some((_, other)) => bail!("unknown sort order '{other}' (expected asc or desc)"),
            None => params.sort(raw, SortOrder::Asc),
        };
    }
    if let Some(page) = args.page {
        params = params.page(page, args.page_size);
    }
    if args.populate {
        params = params.populate_all();
    }
    if args.preview {
        params = params.publication_state(PublicationState::Preview);
    }
    Ok(params)
}

/// Build a payload: `--data` first, then `--set`, `--null` and `--unset` on
/// top of it.
pub fn payload_from_args(args: &FieldArgs) -> anyhow::Result<Payload> {
    let mut payload = match &args.data {
        Some(raw) => {
            let value: Value = serde_json::from_str(raw).context("--data is not valid JSON")?;
            Payload::from_serialize(&value).context("--data must be a JSON object")?
        }
        None => Payload::new(),
    };

    for raw in &args.set {
        let (key, value) = split_assignment(raw)?;
        payload = payload.set(key, parse_value(value));
    }
    for key in &args.null {
        payload = payload.null(key.as_str());
    }
    for key in &args.unset {
        payload = payload.unset(key.as_str());
    }

    if payload.cleaned().is_empty() {
        bail!("nothing to send; use --data or --set");
    }
    Ok(payload)
}
