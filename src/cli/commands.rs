//! CLI command implementations
//!
//! `serve` boots a store, wires it into the query engine and runs the HTTP
//! server on a tokio runtime. `migrate` prepares the PostgreSQL schema.

use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use crate::http_server::HttpServer;
use crate::query::QueryEngine;
use crate::store::{seed_default_categories, InMemoryStore, PostgresStore, TriviaStore};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};

const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            in_memory,
        } => serve(&config, port, in_memory),
        Command::Migrate { config, seed } => migrate(&config, seed),
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the default filter
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Start the HTTP API server
///
/// With `in_memory`, questions live only as long as the process and the
/// default categories are pre-seeded. Otherwise the PostgreSQL schema is
/// created if needed before serving.
pub fn serve(config_path: &Path, port: Option<u16>, in_memory: bool) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    runtime()?.block_on(async move {
        if in_memory {
            let store = InMemoryStore::new();
            seed_default_categories(&store).await?;
            tracing::warn!("serving from an in-memory store; data is lost on exit");
            serve_store(config, store).await
        } else {
            let store = PostgresStore::connect(&config.database).await?;
            store.migrate().await?;
            serve_store(config, store).await
        }
    })
}

async fn serve_store<S: TriviaStore>(config: Config, store: S) -> CliResult<()> {
    let engine = QueryEngine::with_page_size(Arc::new(store), config.page_size);
    HttpServer::with_config(config.server, engine)
        .start()
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

/// Create the schema, optionally seeding the default categories
pub fn migrate(config_path: &Path, seed: bool) -> CliResult<()> {
    let config = Config::load(config_path)?;

    runtime()?.block_on(async move {
        let store = PostgresStore::connect(&config.database).await?;
        store.migrate().await?;

        if seed {
            let inserted = seed_default_categories(&store).await?;
            if inserted == 0 {
                tracing::info!("categories already present, nothing seeded");
            }
        }
        Ok::<(), CliError>(())
    })
}
