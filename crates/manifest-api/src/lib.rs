//! JSON REST API for the passenger manifest.
//!
//! Exposes an axum [`Router`] backed by any
//! [`manifest_core::store::PassengerStore`], together with the CSV importer
//! and the startup seeding step it shares with the server binary. CORS, TLS
//! and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = manifest_api::api_router(Arc::new(store), ApiConfig::default());
//! ```

pub mod error;
pub mod import;
pub mod passengers;
pub mod seed;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json,
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use manifest_core::store::PassengerStore;
use serde_json::{Value, json};

pub use error::ApiError;
pub use import::{ImportError, ImportSummary, import_file};
pub use seed::{SeedOutcome, seed_if_empty};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Settings the handlers need beyond the store itself.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// Where uploaded CSV files are spooled before import.
  pub upload_dir:       PathBuf,
  /// Request body limit for the upload endpoint.
  pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      upload_dir:       std::env::temp_dir(),
      max_upload_bytes: 16 * 1024 * 1024,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub config: Arc<ApiConfig>,
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      config: Arc::clone(&self.config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type. Collection routes answer with and without a
/// trailing slash.
pub fn api_router<S>(store: Arc<S>, config: ApiConfig) -> Router<()>
where
  S: PassengerStore + 'static,
{
  let body_limit = config.max_upload_bytes;
  let state = ApiState { store, config: Arc::new(config) };

  Router::new()
    .route("/", get(root))
    // Passengers
    .route("/passengers", get(passengers::list::<S>))
    .route("/passengers/", get(passengers::list::<S>))
    .route("/passengers/statistics", get(passengers::statistics::<S>))
    .route("/passengers/{id}", get(passengers::get_one::<S>))
    // Import
    .route("/passengers/import-csv", post(passengers::import_csv::<S>))
    .route("/passengers/import-csv/", post(passengers::import_csv::<S>))
    .layer(DefaultBodyLimit::max(body_limit))
    .with_state(state)
}

/// `GET /`
async fn root() -> Json<Value> {
  Json(json!({ "message": "Welcome to Titanic API" }))
}
