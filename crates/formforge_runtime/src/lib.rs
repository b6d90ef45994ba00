//! Form sessions, serialization, and CLI for FormForge.
//!
//! This crate provides:
//! - [`FormSession`] - A schema opened for filling in and submitting
//! - [`serialize`] - JSON and `MessagePack` encoding plus file helpers
//! - [`cli`] - The `formforge` command line
//! - [`logging`] - Log filter selection and subscriber setup

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod logging;
pub mod serialize;
pub mod session;

pub use serialize::{Format, from_bytes, from_json, load_from_file, save_to_file, to_bytes, to_json};
pub use session::{FormSession, INVALID_SUBMISSION_MESSAGE, SUBMITTED_MESSAGE, SubmissionPayload};
