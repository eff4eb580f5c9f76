//! The importer: load a CSV file and replace the store's contents with it.
//!
//! The whole file is read and parsed before the store is touched, and the
//! store swaps the dataset in a single transaction, so a failure at any point
//! leaves the previous dataset in place.

use std::{
  io,
  path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use manifest_core::store::PassengerStore;
use thiserror::Error;

/// Outcome of a successful import.
#[derive(Debug, Clone)]
pub struct ImportSummary {
  /// Number of passengers now in the store.
  pub count:       usize,
  pub source:      PathBuf,
  pub imported_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum ImportError {
  #[error("file not found: {}", .0.display())]
  NotFound(PathBuf),

  #[error("I/O error on {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid data: {0}")]
  InvalidData(#[from] manifest_csv::Error),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Replace the contents of `store` with the passengers in the CSV at `path`.
pub async fn import_file<S>(
  store: &S,
  path: &Path,
) -> Result<ImportSummary, ImportError>
where
  S: PassengerStore,
{
  let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
    io::ErrorKind::NotFound => ImportError::NotFound(path.to_path_buf()),
    _ => ImportError::Io { path: path.to_path_buf(), source: e },
  })?;

  let passengers = manifest_csv::parse_bytes(&bytes).inspect_err(|e| {
    tracing::warn!(source = %path.display(), line = ?e.line(), error = %e, "rejected CSV");
  })?;
  let parsed = passengers.len();

  let count = store
    .replace_all(passengers)
    .await
    .map_err(|e| ImportError::Storage(Box::new(e)))?;

  tracing::info!(source = %path.display(), parsed, count, "imported passengers");

  Ok(ImportSummary {
    count,
    source: path.to_path_buf(),
    imported_at: Utc::now(),
  })
}
