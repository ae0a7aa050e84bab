//! [`SqliteCollection`] — the SQLite implementation of [`ParcelCollection`].

use std::path::Path;

use uuid::Uuid;

use parcel_core::{
  collection::{DeleteOutcome, ParcelCollection, ParcelQuery},
  parcel::{NewParcel, Parcel},
};

use crate::{
  Result,
  encode::{RawParcel, encode_document, encode_dt, encode_uuid},
  schema::SCHEMA,
};

/// Newest `createdAt` first, untimestamped rows last, then newest insert.
const ORDER_BY: &str =
  "ORDER BY created_at IS NULL, created_at DESC, seq DESC";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A parcel collection backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteCollection {
  conn: tokio_rusqlite::Connection,
}

impl SqliteCollection {
  /// Open (or create) a collection at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let collection = Self { conn };
    collection.init_schema().await?;
    tracing::debug!(?path, "opened parcel collection");
    Ok(collection)
  }

  /// Open an in-memory collection — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let collection = Self { conn };
    collection.init_schema().await?;
    Ok(collection)
  }

  /// Close the underlying connection, waiting for queued calls to finish.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    tracing::debug!("closed parcel collection");
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn raw_parcel(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawParcel> {
  Ok(RawParcel {
    parcel_id: row.get(0)?,
    document:  row.get(1)?,
  })
}

// ─── ParcelCollection impl ───────────────────────────────────────────────────

impl ParcelCollection for SqliteCollection {
  type Error = crate::Error;

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert(&self, input: NewParcel) -> Result<Parcel> {
    let parcel = input.into_parcel(Uuid::new_v4());

    let id_str         = encode_uuid(parcel.parcel_id);
    let created_by     = parcel.created_by().map(str::to_owned);
    let created_at_str = parcel.created_at().map(encode_dt);
    let document       = encode_document(&parcel)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO parcels (parcel_id, created_by, created_at, document)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, created_by, created_at_str, document],
        )?;
        Ok(())
      })
      .await?;

    Ok(parcel)
  }

  async fn find(&self, query: ParcelQuery) -> Result<Vec<Parcel>> {
    let raws: Vec<RawParcel> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(created_by) = query.created_by {
          let mut stmt = conn.prepare(&format!(
            "SELECT parcel_id, document FROM parcels
             WHERE created_by = ?1 {ORDER_BY}"
          ))?;
          stmt
            .query_map(rusqlite::params![created_by], raw_parcel)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT parcel_id, document FROM parcels {ORDER_BY}"
          ))?;
          stmt
            .query_map([], raw_parcel)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawParcel::into_parcel).collect()
  }

  async fn delete(&self, parcel_id: Uuid) -> Result<DeleteOutcome> {
    let id_str = encode_uuid(parcel_id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM parcels WHERE parcel_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(DeleteOutcome::deleted(deleted as u64))
  }
}
