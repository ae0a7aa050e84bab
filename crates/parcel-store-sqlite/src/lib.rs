//! SQLite backend for the parcel collection.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Parcels are stored as JSON documents;
//! only the fields used for filtering and ordering get their own columns.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteCollection;

#[cfg(test)]
mod tests;
