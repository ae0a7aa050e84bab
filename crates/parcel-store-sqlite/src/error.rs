//! Error type for `parcel-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A stored document's `_id` disagrees with its row key.
  #[error("document id {found} does not match row {row}")]
  IdMismatch { row: uuid::Uuid, found: uuid::Uuid },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
