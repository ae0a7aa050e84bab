//! The `ParcelCollection` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `parcel-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::parcel::{NewParcel, Parcel};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`ParcelCollection::find`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParcelQuery {
  /// Restrict to parcels whose `createdBy` equals this value exactly.
  pub created_by: Option<String>,
}

impl ParcelQuery {
  pub fn created_by(value: impl Into<String>) -> Self {
    Self { created_by: Some(value.into()) }
  }
}

// ─── Delete outcome ──────────────────────────────────────────────────────────

/// Result of [`ParcelCollection::delete`], returned to HTTP callers as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
  pub acknowledged:  bool,
  /// Zero or one.
  pub deleted_count: u64,
}

impl DeleteOutcome {
  pub fn deleted(count: u64) -> Self {
    Self { acknowledged: true, deleted_count: count }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a document collection holding parcels.
///
/// Every method is a single independent call; there is no cross-call
/// transaction. All methods return `Send` futures so the trait can be used
/// from axum handlers on a multi-threaded runtime.
pub trait ParcelCollection: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Cheap liveness check against the backing store.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Persist a new parcel under a freshly assigned identifier.
  fn insert(
    &self,
    input: NewParcel,
  ) -> impl Future<Output = Result<Parcel, Self::Error>> + Send + '_;

  /// Return parcels matching `query`, newest `createdAt` first.
  ///
  /// Parcels without `createdAt` sort after all timestamped ones. Ties are
  /// broken by insertion order, most recent first. An empty result is not an
  /// error.
  fn find(
    &self,
    query: ParcelQuery,
  ) -> impl Future<Output = Result<Vec<Parcel>, Self::Error>> + Send + '_;

  /// Delete the parcel with `parcel_id`, if any. Deleting an unknown id
  /// succeeds with a count of zero.
  fn delete(
    &self,
    parcel_id: Uuid,
  ) -> impl Future<Output = Result<DeleteOutcome, Self::Error>> + Send + '_;
}
