//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Bodies are always `{"message": ...}`. Store failures are logged here and
//! answered with a generic message; their cause never reaches the caller.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use parcel_core::ValidationError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("invalid parcel id: {0:?}")]
  InvalidId(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Box a backend error. Used as `.map_err(ApiError::store)`.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(ValidationError::MissingFields(missing)) => {
        tracing::debug!(?missing, "rejected parcel");
        (
          StatusCode::BAD_REQUEST,
          Json(json!({
            "message": "Missing required fields",
            "missing": missing,
          })),
        )
          .into_response()
      }
      ApiError::BadRequest(detail) => {
        tracing::debug!(%detail, "rejected request body");
        (
          StatusCode::BAD_REQUEST,
          Json(json!({ "message": "Invalid request body" })),
        )
          .into_response()
      }
      ApiError::InvalidId(id) => {
        tracing::debug!(%id, "rejected parcel id");
        (
          StatusCode::BAD_REQUEST,
          Json(json!({ "message": "Invalid parcel id" })),
        )
          .into_response()
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "message": "Internal server error" })),
        )
          .into_response()
      }
    }
  }
}
