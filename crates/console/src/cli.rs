//! Command-line surface.

use std::path::PathBuf;

use autocatalog_catalog::CollectionKind;
use autocatalog_core::EntityId;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "autocatalog", about = "Admin console for the vehicle catalog", version)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "AUTOCATALOG_LOG", default_value = "warn", global = true)]
    pub log: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a personal session.
    Login {
        /// E-mail or username.
        identifier: String,
        /// Read from stdin when omitted.
        #[arg(long, env = "AUTOCATALOG_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Log in even when a session already exists.
        #[arg(long)]
        force: bool,
    },
    /// End the personal session.
    Logout,
    /// Show who the console is acting as.
    Whoami,
    /// Resolve a console path through the route guard.
    Open { path: String },
    /// List records of a collection.
    List(ListArgs),
    /// Show one record by numeric id (drafts included).
    Show {
        collection: CollectionKind,
        id: EntityId,
    },
    /// Create a record.
    Create {
        collection: CollectionKind,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Update a record by numeric id.
    Update {
        collection: CollectionKind,
        id: EntityId,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a record by numeric id.
    Delete {
        collection: CollectionKind,
        id: EntityId,
    },
    /// Upload files to the media library.
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    pub collection: CollectionKind,

    /// `field=value` or `field:$op=value`; dotted fields reach relations.
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// `field` or `field:desc`.
    #[arg(long)]
    pub sort: Vec<String>,

    #[arg(long)]
    pub page: Option<u64>,

    #[arg(long, default_value_t = 25)]
    pub page_size: u64,

    /// Expand every relation.
    #[arg(long)]
    pub populate: bool,

    /// Include drafts.
    #[arg(long)]
    pub preview: bool,
}

#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Full JSON object of fields.
    #[arg(long)]
    pub data: Option<String>,

    /// `field=value`; values that parse as JSON are sent as JSON.
    #[arg(long = "set")]
    pub set: Vec<String>,

    /// Send `null` for a field.
    #[arg(long = "null")]
    pub null: Vec<String>,

    /// Leave a field out of the request even if `--data` sets it.
    #[arg(long = "unset")]
    pub unset: Vec<String>,
}
