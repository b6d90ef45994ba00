//! Schema and payload serialization.
//!
//! JSON is the wire format shared with the data-access collaborator.
//! `MessagePack` is a compact archive format for the same types. Both work
//! for any serde type: [`FormSchema`](formforge_model::FormSchema),
//! [`FormSchemaPayload`](formforge_model::FormSchemaPayload), editor
//! snapshots, configs.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use formforge_foundation::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// On-disk encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// `MessagePack` with named struct fields.
    MessagePack,
}

impl Format {
    /// Picks a format from a file extension: `.msgpack` and `.mp` are
    /// `MessagePack`, anything else is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("msgpack") || ext.eq_ignore_ascii_case("mp") => {
                Self::MessagePack
            }
            _ => Self::Json,
        }
    }

    /// Encodes `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode<T: Serialize + ?Sized>(self, value: &T) -> Result<Vec<u8>> {
        match self {
            Self::Json => to_json(value).map(String::into_bytes),
            Self::MessagePack => to_bytes(value),
        }
    }

    /// Decodes a `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid `T`.
    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T> {
        match self {
            Self::Json => {
                serde_json::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))
            }
            Self::MessagePack => from_bytes(bytes),
        }
    }
}

/// Serializes to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::serialization(e.to_string()))
}

/// Deserializes from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not a valid `T`.
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| Error::serialization(e.to_string()))
}

/// Serializes to `MessagePack` bytes.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(value).map_err(|e| Error::serialization(e.to_string()))
}

/// Deserializes from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))
}

/// Saves `value` to `path`, choosing the format from its extension.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialization fails.
pub fn save_to_file<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = Format::from_path(path).encode(value)?;

    let file = File::create(path).map_err(|e| {
        Error::io(format!("failed to create file '{}': {e}", path.display()))
    })?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(format!("failed to write to file '{}': {e}", path.display())))?;
    writer
        .flush()
        .map_err(|e| Error::io(format!("failed to flush file '{}': {e}", path.display())))?;

    Ok(())
}

/// Loads a `T` from `path`, choosing the format from its extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read or deserialization fails.
pub fn load_from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open file '{}': {e}", path.display())))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(format!("failed to read file '{}': {e}", path.display())))?;

    Format::from_path(path).decode(&bytes)
}
