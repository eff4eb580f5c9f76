//! manifest-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, seeds it from the bundled dataset when empty, and serves the
//! JSON API over HTTP.
//!
//! # One-shot import
//!
//! To replace the stored dataset from a CSV file without starting the server:
//!
//! ```text
//! cargo run -p manifest-server -- --import data/train.csv
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use manifest_api::{SeedOutcome, import_file, seed_if_empty};
use manifest_server::ServerConfig;
use manifest_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Passenger manifest API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Import this CSV into the store, print the passenger count and exit.
  #[arg(long, value_name = "CSV")]
  import: Option<PathBuf>,

  /// Skip seeding an empty store at startup.
  #[arg(long)]
  no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store_path = server_cfg.store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Helper mode: import and exit.
  if let Some(csv) = cli.import {
    let summary = import_file(&store, &csv)
      .await
      .with_context(|| format!("failed to import {csv:?}"))?;
    tracing::info!(imported_at = %summary.imported_at, "import finished");
    println!("{}", summary.count);
    return Ok(());
  }

  if cli.no_seed {
    tracing::info!("startup seeding disabled");
  } else if let SeedOutcome::Failed(reason) =
    seed_if_empty(&store, &server_cfg.seed_paths).await
  {
    tracing::warn!(%reason, "continuing without seed data");
  }

  let app = manifest_server::app(Arc::new(store), &server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
