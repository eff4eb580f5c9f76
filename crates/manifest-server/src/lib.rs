//! HTTP server wiring for the passenger manifest API.
//!
//! Holds the runtime configuration and wraps the API router from
//! `manifest-api` in the CORS and request-tracing layers. The binary in
//! `main.rs` adds process concerns: logging, the store, seeding, and the
//! listener.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, http::HeaderValue};
use manifest_api::ApiConfig;
use manifest_core::store::PassengerStore;
use serde::Deserialize;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `MANIFEST_*` environment variables. Every field has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  /// Candidate CSV files for startup seeding, tried in order.
  pub seed_paths:       Vec<PathBuf>,
  pub cors_origins:     Vec<String>,
  pub upload_dir:       PathBuf,
  pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let api = ApiConfig::default();
    Self {
      host:             "0.0.0.0".into(),
      port:             8000,
      store_path:       PathBuf::from("manifest.db"),
      seed_paths:       vec![
        PathBuf::from("/app/data/train.csv"),
        PathBuf::from("../data/train.csv"),
      ],
      cors_origins:     vec!["http://localhost:3000".into()],
      upload_dir:       api.upload_dir,
      max_upload_bytes: api.max_upload_bytes,
    }
  }
}

impl ServerConfig {
  /// Load from an optional TOML file at `path`, overridden by environment
  /// variables such as `MANIFEST_PORT=9000`. List keys take comma-separated
  /// values (`MANIFEST_CORS_ORIGINS=http://a,http://b`).
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("MANIFEST")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("seed_paths")
          .with_list_parse_key("cors_origins"),
      )
      .build()?
      .try_deserialize()
  }

  /// `host:port`, suitable for binding.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The store path with a leading `~/` expanded.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      upload_dir:       self.upload_dir.clone(),
      max_upload_bytes: self.max_upload_bytes,
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// CORS for the configured origins, any method and any header. Origins that
/// are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
  let origins: Vec<HeaderValue> = origins
    .iter()
    .filter_map(|o| match HeaderValue::from_str(o) {
      Ok(v) => Some(v),
      Err(_) => {
        tracing::warn!(origin = %o, "ignoring invalid CORS origin");
        None
      }
    })
    .collect();

  CorsLayer::new()
    .allow_origin(origins)
    .allow_methods(Any)
    .allow_headers(Any)
}

/// Build the full application: API routes plus CORS and request tracing.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: PassengerStore + 'static,
{
  manifest_api::api_router(store, config.api_config())
    .layer(cors_layer(&config.cors_origins))
    .layer(TraceLayer::new_for_http())
}
