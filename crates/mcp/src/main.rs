#![forbid(unsafe_code)]

mod config;
mod entry;
mod server;
mod support;
mod tools;

pub(crate) use support::*;

use clap::Parser;
use todo_storage::SqliteStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

// Protocol negotiation: echo the widely deployed MCP baseline.
const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "todo-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) struct McpServer {
    initialized: bool,
    store: SqliteStore,
}

fn init_tracing(directive: &str) {
    // stdout carries the protocol; diagnostics only ever go to stderr.
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::parse();
    init_tracing(&config.log);

    let store = SqliteStore::open(&config.storage_dir).inspect_err(|err| {
        tracing::error!(storage_dir = %config.storage_dir.display(), error = %err, "failed to open todo store");
    })?;
    tracing::info!(
        storage_dir = %config.storage_dir.display(),
        version = SERVER_VERSION,
        "todo_mcp serving on stdio"
    );

    let mut server = McpServer::new(store);
    let result = entry::run_stdio(&mut server);
    if let Err(err) = &result {
        tracing::error!(error = %err, "stdio transport failed");
    }
    result
}
