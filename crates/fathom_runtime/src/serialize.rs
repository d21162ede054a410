//! World serialization using `MessagePack`.
//!
//! The world data is a pure tree of ids and values, so the whole of it
//! saves as one blob. Rule chains are code and are never serialized; a
//! restored blob drops into a freshly built game.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use fathom_foundation::{Error, ErrorKind, Result};
use fathom_world::WorldData;

/// Serializes world data to `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(data: &WorldData) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(data)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes world data from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<WorldData> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Saves world data to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialization
/// fails.
pub fn save_to_file<P: AsRef<Path>>(data: &WorldData, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to create '{}': {e}",
            path.as_ref().display()
        )))
    })?;
    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(data)?;
    writer.write_all(&bytes).and_then(|()| writer.flush()).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to write '{}': {e}",
            path.as_ref().display()
        )))
    })
}

/// Loads world data from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or deserialization
/// fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<WorldData> {
    let file = File::open(path.as_ref()).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to open '{}': {e}",
            path.as_ref().display()
        )))
    })?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to read '{}': {e}",
            path.as_ref().display()
        )))
    })?;
    from_bytes(&bytes)
}
