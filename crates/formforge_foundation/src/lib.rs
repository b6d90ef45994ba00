//! Core values, identifiers, and errors for FormForge.
//!
//! This crate provides:
//! - [`FieldValue`] - The value type held by every form control
//! - [`ValueSnapshot`] - Consolidated field id to value map
//! - [`FieldId`] / [`RuleId`] - String identifiers
//! - [`IdGenerator`] - Random and seeded identifier sources
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod id;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind};
pub use id::{FieldId, IdGenerator, RandomIds, RuleId, SeededIds};
pub use value::{FieldValue, ValueSnapshot};

/// Result type alias using the FormForge error type.
pub type Result<T> = std::result::Result<T, Error>;
