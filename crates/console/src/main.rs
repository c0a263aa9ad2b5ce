use anyhow::Context;
use autocatalog_client::{AppState, ClientConfig};
use autocatalog_console::{Cli, execute};
use autocatalog_observability::LogFormat;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may already be set.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    autocatalog_observability::init_with(&cli.log, format);

    let config = ClientConfig::from_env().context("invalid configuration")?;
    let state = AppState::from_config(config)
        .await
        .context("failed to open the client session")?;

    match execute(&state, cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            if let Some(message) = state.signals.last_error() {
                eprintln!("{message}");
            }
            Err(err)
        }
    }
}
