//! JSON REST API for parcels.
//!
//! Exposes an axum [`Router`] backed by any
//! [`parcel_core::collection::ParcelCollection`]. TLS, CORS and request
//! tracing are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = parcel_api::api_router(Arc::new(collection));
//! ```

pub mod error;
pub mod parcels;
pub mod root;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get},
};
use parcel_core::collection::ParcelCollection;

pub use error::ApiError;

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ParcelCollection + 'static,
{
  Router::new()
    .route("/", get(root::handler))
    .route("/parcels", get(parcels::list::<S>).post(parcels::create::<S>))
    .route("/parcels/{id}", delete(parcels::delete_one::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
