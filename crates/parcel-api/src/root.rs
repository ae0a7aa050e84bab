//! Handler for `GET /`.

/// Plaintext liveness acknowledgement. Does not touch the store.
pub async fn handler() -> &'static str { "Parcel server is running" }
