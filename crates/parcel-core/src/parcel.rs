//! Parcel types: the stored record, the unvalidated draft accepted from
//! callers, and the validated input handed to a collection.
//!
//! Parcels are immutable once stored. The only lifecycle events are insertion
//! (which assigns the identifier) and deletion.
//!
//! Only `sender`, `receiver` and `address` are typed. Every other key,
//! including `createdBy` and `createdAt`, is kept exactly as the caller sent
//! it; [`Parcel::created_by`] and [`Parcel::created_at`] interpret those two
//! when they can and return `None` otherwise.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{RequiredField, ValidationError};

/// JSON key carrying the store-assigned identifier.
pub const ID_KEY: &str = "_id";

/// JSON key naming the submitter; the list filter matches on it.
pub const CREATED_BY_KEY: &str = "createdBy";

/// JSON key holding the creation time; the default sort key.
pub const CREATED_AT_KEY: &str = "createdAt";

// ─── Field interpretation ────────────────────────────────────────────────────

/// Interpret a `createdAt` value as an instant.
///
/// Accepts RFC 3339 strings, date-only `YYYY-MM-DD` strings (midnight UTC),
/// and numbers as milliseconds since the Unix epoch. Anything else is `None`.
pub fn interpret_timestamp(value: &Value) -> Option<DateTime<Utc>> {
  match value {
    Value::String(s) => DateTime::parse_from_rfc3339(s)
      .map(|dt| dt.with_timezone(&Utc))
      .ok()
      .or_else(|| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
          .ok()
          .and_then(|d| d.and_hms_opt(0, 0, 0))
          .map(|dt| dt.and_utc())
      }),
    Value::Number(n) => n
      .as_i64()
      .or_else(|| n.as_f64().map(|f| f as i64))
      .and_then(DateTime::from_timestamp_millis),
    _ => None,
  }
}

fn created_by_in(fields: &Map<String, Value>) -> Option<&str> {
  fields.get(CREATED_BY_KEY).and_then(Value::as_str)
}

fn created_at_in(fields: &Map<String, Value>) -> Option<DateTime<Utc>> {
  fields.get(CREATED_AT_KEY).and_then(interpret_timestamp)
}

// ─── Parcel ──────────────────────────────────────────────────────────────────

/// A persisted parcel, as returned by [`crate::collection::ParcelCollection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
  /// Assigned by the collection on insert; never changes.
  #[serde(rename = "_id")]
  pub parcel_id: Uuid,
  pub sender:    String,
  pub receiver:  String,
  pub address:   String,
  /// Every other key the caller supplied, kept verbatim.
  #[serde(flatten)]
  pub extra:     Map<String, Value>,
}

impl Parcel {
  /// `createdBy`, if it is a string.
  pub fn created_by(&self) -> Option<&str> { created_by_in(&self.extra) }

  /// `createdAt`, if it can be read as an instant. See [`interpret_timestamp`].
  pub fn created_at(&self) -> Option<DateTime<Utc>> { created_at_in(&self.extra) }
}

// ─── NewParcel ───────────────────────────────────────────────────────────────

/// Validated input to [`crate::collection::ParcelCollection::insert`].
///
/// Only obtainable through [`ParcelDraft::validate`] or [`NewParcel::new`],
/// so `sender`, `receiver` and `address` are always non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NewParcel {
  sender:    String,
  receiver:  String,
  address:   String,
  pub extra: Map<String, Value>,
}

impl NewParcel {
  /// Build a parcel with no optional fields set.
  pub fn new(
    sender: impl Into<String>,
    receiver: impl Into<String>,
    address: impl Into<String>,
  ) -> Result<Self, ValidationError> {
    ParcelDraft {
      sender:   Some(sender.into()),
      receiver: Some(receiver.into()),
      address:  Some(address.into()),
      extra:    Map::new(),
    }
    .validate()
  }

  /// Set an optional field. `_id` is ignored.
  pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    let key = key.into();
    if key != ID_KEY {
      self.extra.insert(key, value.into());
    }
    self
  }

  pub fn sender(&self) -> &str { &self.sender }

  pub fn receiver(&self) -> &str { &self.receiver }

  pub fn address(&self) -> &str { &self.address }

  pub fn created_by(&self) -> Option<&str> { created_by_in(&self.extra) }

  pub fn created_at(&self) -> Option<DateTime<Utc>> { created_at_in(&self.extra) }

  /// Attach the identifier chosen by the collection.
  pub fn into_parcel(self, parcel_id: Uuid) -> Parcel {
    Parcel {
      parcel_id,
      sender: self.sender,
      receiver: self.receiver,
      address: self.address,
      extra: self.extra,
    }
  }
}

// ─── ParcelDraft ─────────────────────────────────────────────────────────────

/// A create payload as it arrives from a caller. Nothing is checked yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParcelDraft {
  pub sender:   Option<String>,
  pub receiver: Option<String>,
  pub address:  Option<String>,
  #[serde(flatten)]
  pub extra:    Map<String, Value>,
}

impl ParcelDraft {
  /// Check that every required field is present and non-empty.
  ///
  /// All missing fields are reported at once. No other key is inspected. A
  /// caller-supplied `_id` is dropped; identifiers are assigned by the
  /// collection.
  pub fn validate(self) -> Result<NewParcel, ValidationError> {
    let Self { sender, receiver, address, mut extra } = self;

    let mut missing = Vec::new();
    let sender = present(sender, RequiredField::Sender, &mut missing);
    let receiver = present(receiver, RequiredField::Receiver, &mut missing);
    let address = present(address, RequiredField::Address, &mut missing);

    match (sender, receiver, address) {
      (Some(sender), Some(receiver), Some(address)) => {
        extra.remove(ID_KEY);
        Ok(NewParcel { sender, receiver, address, extra })
      }
      _ => Err(ValidationError::MissingFields(missing)),
    }
  }
}

fn present(
  value: Option<String>,
  field: RequiredField,
  missing: &mut Vec<RequiredField>,
) -> Option<String> {
  match value {
    Some(v) if !v.is_empty() => Some(v),
    _ => {
      missing.push(field);
      None
    }
  }
}
