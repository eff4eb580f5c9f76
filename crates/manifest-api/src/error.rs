//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::multipart::MultipartError,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::import::ImportError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// Malformed or oversized multipart body; keeps the extractor's status.
  #[error("{}", .0.body_text())]
  Multipart(#[from] MultipartError),

  #[error("Failed to import CSV: {0}")]
  Import(#[from] ImportError),

  /// The upload could not be written to the spool directory.
  #[error("Failed to import CSV: could not store upload")]
  Spool(#[source] std::io::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub(crate) fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Multipart(e) => (e.status(), e.body_text()),
      ApiError::Import(_) | ApiError::Spool(_) | ApiError::Store(_) => {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
