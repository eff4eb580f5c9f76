//! Handlers for the `/passengers` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/passengers` | `skip`/`limit`, or any filter parameter |
//! | `GET`  | `/passengers/statistics` | survival breakdown |
//! | `GET`  | `/passengers/{id}` | 404 if not found |
//! | `POST` | `/passengers/import-csv` | multipart, field `file` |

use std::path::Path as FsPath;

use axum::{
  Json,
  extract::{Multipart, Path, Query, State},
};
use manifest_core::{
  filter::PassengerFilter,
  passenger::Passenger,
  stats::StatsReport,
  store::PassengerStore,
};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{ApiState, error::ApiError, import::import_file};

// ─── List ─────────────────────────────────────────────────────────────────────

const DEFAULT_LIMIT: i64 = 100;

fn default_limit() -> i64 { DEFAULT_LIMIT }

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub skip:     i64,
  #[serde(default = "default_limit")]
  pub limit:    i64,
  pub survived: Option<i64>,
  pub pclass:   Option<i64>,
  pub sex:      Option<String>,
  pub min_age:  Option<f64>,
  pub max_age:  Option<f64>,
  pub embarked: Option<String>,
}

impl ListParams {
  pub fn to_filter(&self) -> PassengerFilter {
    PassengerFilter {
      survived:        self.survived,
      passenger_class: self.pclass,
      sex:             self.sex.clone(),
      min_age:         self.min_age,
      max_age:         self.max_age,
      embarked:        self.embarked.clone(),
    }
  }
}

/// `GET /passengers`
///
/// With any filter parameter every match is returned and `skip`/`limit` are
/// ignored. Negative `skip`/`limit` count as zero.
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Passenger>>, ApiError>
where
  S: PassengerStore + 'static,
{
  let filter = params.to_filter();
  let passengers = if filter.is_empty() {
    let skip = params.skip.max(0) as u64;
    let limit = params.limit.max(0) as u64;
    state.store.list(skip, limit).await
  } else {
    state.store.filter(&filter).await
  }
  .map_err(ApiError::store)?;
  Ok(Json(passengers))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /passengers/{id}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Passenger>, ApiError>
where
  S: PassengerStore + 'static,
{
  let passenger = state
    .store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Passenger not found".into()))?;
  Ok(Json(passenger))
}

// ─── Statistics ───────────────────────────────────────────────────────────────

/// `GET /passengers/statistics`
pub async fn statistics<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<StatsReport>, ApiError>
where
  S: PassengerStore + 'static,
{
  let report = state.store.statistics().await.map_err(ApiError::store)?;
  Ok(Json(report))
}

// ─── Import ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ImportResponse {
  pub message: &'static str,
  pub count:   usize,
}

/// `POST /passengers/import-csv`: multipart body with a `file` field.
///
/// The upload is spooled to a temporary file in the upload directory, which
/// is removed when it drops, so nothing is left behind on any path.
pub async fn import_csv<S>(
  State(state): State<ApiState<S>>,
  mut multipart: Multipart,
) -> Result<Json<ImportResponse>, ApiError>
where
  S: PassengerStore + 'static,
{
  let mut upload = None;
  while let Some(field) = multipart.next_field().await? {
    if field.name() == Some("file") {
      upload = Some(field.bytes().await?);
      break;
    }
  }
  let Some(bytes) = upload else {
    return Err(ApiError::BadRequest("missing multipart field \"file\"".into()));
  };

  let dir = &state.config.upload_dir;
  let spool = spool_upload(dir, &bytes).await.map_err(|e| {
    tracing::error!(error = %e, dir = %dir.display(), "failed to spool upload");
    ApiError::Spool(e)
  })?;

  let result = import_file(&*state.store, spool.path()).await;

  if let Err(e) = spool.close() {
    tracing::warn!(error = %e, "failed to remove spooled upload");
  }

  let summary = result?;
  Ok(Json(ImportResponse {
    message: "CSV data imported successfully",
    count:   summary.count,
  }))
}

/// Write `bytes` to a fresh `upload-*.csv` in `dir`, creating `dir` if needed.
async fn spool_upload(dir: &FsPath, bytes: &[u8]) -> std::io::Result<NamedTempFile> {
  tokio::fs::create_dir_all(dir).await?;
  let spool = tempfile::Builder::new()
    .prefix("upload-")
    .suffix(".csv")
    .tempfile_in(dir)?;
  // On error the file is dropped, and so removed, before returning.
  tokio::fs::write(spool.path(), bytes).await?;
  Ok(spool)
}
