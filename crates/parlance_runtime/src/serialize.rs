//! World snapshots using `MessagePack`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use parlance_foundation::{Error, ErrorKind, Result};
use parlance_storage::World;

/// Serializes a world to bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(world: &World) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(world).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a world from bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a world snapshot.
pub fn from_bytes(bytes: &[u8]) -> Result<World> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Saves a world to a file, replacing it if it exists.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialization fails.
pub fn save_to_file<P: AsRef<Path>>(world: &World, path: P) -> Result<()> {
    let path = path.as_ref();
    let io_error =
        |e: std::io::Error| Error::new(ErrorKind::Io(format!("failed to write '{}': {e}", path.display())));
    let bytes = to_bytes(world)?;
    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    writer.write_all(&bytes).map_err(io_error)?;
    writer.flush().map_err(io_error)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved world");
    Ok(())
}

/// Loads a world from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a snapshot.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<World> {
    let path = path.as_ref();
    let io_error =
        |e: std::io::Error| Error::new(ErrorKind::Io(format!("failed to read '{}': {e}", path.display())));
    let mut bytes = Vec::new();
    BufReader::new(File::open(path).map_err(io_error)?)
        .read_to_end(&mut bytes)
        .map_err(io_error)?;
    from_bytes(&bytes)
}
