//! Flow Scryfall - Scryfall card search plugin for Flow Launcher
//!
//! Each launcher call spawns this process with one JSON-RPC payload as its
//! argument. Query results are written to stdout as a single JSON document;
//! diagnostics go to stderr.

mod config;
mod dispatcher;
mod error;
mod formatter;
mod types;

use crate::config::PluginConfig;
use crate::dispatcher::{Dispatcher, Outcome, SystemOpener};
use crate::error::{PluginError, Result};
use crate::types::Invocation;
use std::io::Write;
use tracing::debug;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    let payload = std::env::args()
        .nth(1)
        .ok_or_else(|| PluginError::Payload("missing invocation argument".to_string()))?;
    let invocation: Invocation = serde_json::from_str(&payload)?;
    debug!(method = ?invocation.method, parameters = ?invocation.parameters, "Invoked");

    let config = PluginConfig::from_env()?;
    debug!(root = ?config.root, api_url = %config.api_url, "Loaded plugin config");

    let dispatcher = Dispatcher::new(invocation.settings.clone(), &config, SystemOpener);

    if let Outcome::Respond(response) = dispatcher.dispatch(&invocation).await? {
        let body = serde_json::to_string(&response)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", body)?;
        stdout.flush()?;
    }

    Ok(())
}

/// Crates whose recoverable failures are only visible in the logs
const LOG_TARGETS: [&str; 3] = ["flow_scryfall", "card_image_cache", "scryfall_api"];

/// Filter used when `RUST_LOG` is unset
fn default_directives() -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}=info", target))
        .collect::<Vec<_>>()
        .join(",")
}

/// Logs go to stderr; stdout belongs to the launcher protocol
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives()));

    // Use JSON format for structured log collection when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();
    };
}
