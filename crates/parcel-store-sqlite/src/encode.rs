//! Encoding and decoding helpers between parcel types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with fixed microsecond
//! precision, so lexical order in SQL equals chronological order. UUIDs are
//! stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use parcel_core::parcel::Parcel;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ─── Parcel document ──────────────────────────────────────────────────────────

pub fn encode_document(parcel: &Parcel) -> Result<String> {
  Ok(serde_json::to_string(parcel)?)
}

/// A row as read from the `parcels` table.
pub struct RawParcel {
  pub parcel_id: String,
  pub document:  String,
}

impl RawParcel {
  pub fn into_parcel(self) -> Result<Parcel> {
    let row = decode_uuid(&self.parcel_id)?;
    let parcel: Parcel = serde_json::from_str(&self.document)?;
    if parcel.parcel_id != row {
      return Err(Error::IdMismatch { row, found: parcel.parcel_id });
    }
    Ok(parcel)
  }
}
