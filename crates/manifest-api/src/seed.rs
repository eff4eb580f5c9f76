//! Startup seeding: import a bundled dataset into an empty store.

use std::path::{Path, PathBuf};

use manifest_core::store::PassengerStore;

use crate::import::{ImportSummary, import_file};

/// What [`seed_if_empty`] did.
#[derive(Debug)]
pub enum SeedOutcome {
  /// None of the candidate paths exist.
  NoSeedFile,
  /// The store already holds this many passengers; nothing was imported.
  AlreadyPopulated(u64),
  Imported(ImportSummary),
  /// Seeding was attempted and failed. The server keeps running.
  Failed(String),
}

/// Import the first existing file in `candidates`, but only when the store is
/// empty. Never fails; problems are logged and reported as
/// [`SeedOutcome::Failed`].
pub async fn seed_if_empty<S>(store: &S, candidates: &[PathBuf]) -> SeedOutcome
where
  S: PassengerStore,
{
  let Some(path) = first_existing(candidates).await else {
    tracing::warn!(?candidates, "no seed file found; starting with an empty store");
    return SeedOutcome::NoSeedFile;
  };

  match store.count().await {
    Ok(0) => {}
    Ok(n) => {
      tracing::info!(count = n, "store already populated; skipping seed");
      return SeedOutcome::AlreadyPopulated(n);
    }
    Err(e) => {
      tracing::error!(error = %e, "could not count stored passengers");
      return SeedOutcome::Failed(e.to_string());
    }
  }

  match import_file(store, path).await {
    Ok(summary) => {
      tracing::info!(
        count = summary.count,
        source = %path.display(),
        imported_at = %summary.imported_at,
        "seeded store"
      );
      SeedOutcome::Imported(summary)
    }
    Err(e) => {
      tracing::error!(error = %e, source = %path.display(), "seeding failed");
      SeedOutcome::Failed(e.to_string())
    }
  }
}

async fn first_existing(candidates: &[PathBuf]) -> Option<&Path> {
  for path in candidates {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
      return Some(path);
    }
  }
  None
}
