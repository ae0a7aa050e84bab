//! Core types and trait definitions for the parcel service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backend and the API layer both depend on it.

pub mod collection;
pub mod error;
pub mod parcel;

pub use error::{RequiredField, ValidationError};
