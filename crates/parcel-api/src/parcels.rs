//! Handlers for `/parcels` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/parcels` | Optional `?email=` filters on `createdBy`; newest first |
//! | `POST`   | `/parcels` | Body: JSON with `sender`, `receiver`, `address`; returns 201 |
//! | `DELETE` | `/parcels/:id` | Returns `{acknowledged, deletedCount}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use parcel_core::{
  collection::{DeleteOutcome, ParcelCollection, ParcelQuery},
  parcel::{Parcel, ParcelDraft},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Only return parcels whose `createdBy` equals this value. An empty value
  /// means no filter.
  pub email: Option<String>,
}

/// `GET /parcels[?email=<createdBy>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Parcel>>, ApiError>
where
  S: ParcelCollection,
{
  let query = ParcelQuery {
    created_by: params.email.filter(|email| !email.is_empty()),
  };
  let parcels = store.find(query).await.map_err(ApiError::store)?;
  Ok(Json(parcels))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
  pub message:     &'static str,
  pub inserted_id: Uuid,
}

/// `POST /parcels` — returns 201 + `{message, insertedId}`.
///
/// Validation happens before the store is touched, so a rejected draft never
/// leaves a record behind.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<ParcelDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ParcelCollection,
{
  let Json(draft) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let input = draft.validate()?;

  let parcel = store.insert(input).await.map_err(ApiError::store)?;
  tracing::info!(parcel_id = %parcel.parcel_id, "parcel added");

  Ok((
    StatusCode::CREATED,
    Json(Created {
      message:     "Parcel added successfully",
      inserted_id: parcel.parcel_id,
    }),
  ))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /parcels/:id`
///
/// A malformed id is a client error and never reaches the store.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError>
where
  S: ParcelCollection,
{
  let parcel_id = Uuid::parse_str(&id).map_err(|_| ApiError::InvalidId(id))?;
  let outcome = store.delete(parcel_id).await.map_err(ApiError::store)?;
  tracing::info!(%parcel_id, deleted = outcome.deleted_count, "parcel delete");
  Ok(Json(outcome))
}
