//! Validation errors for `parcel-core`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A field every persisted parcel must carry with a non-empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredField {
  Sender,
  Receiver,
  Address,
}

impl RequiredField {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Sender => "sender",
      Self::Receiver => "receiver",
      Self::Address => "address",
    }
  }
}

impl fmt::Display for RequiredField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  /// One or more required fields were absent or empty. Never empty itself.
  #[error("missing required fields: {}", join(.0))]
  MissingFields(Vec<RequiredField>),
}

fn join(fields: &[RequiredField]) -> String {
  fields
    .iter()
    .map(|f| f.as_str())
    .collect::<Vec<_>>()
    .join(", ")
}
