// crates/popweight-core/src/loader/output.rs
use super::common_io;
use crate::error::Result;
use crate::model::CountryEntry;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

/// Pretty-printed JSON array, fields in [`CountryEntry`] declaration order.
pub fn write_table<W: Write>(entries: &[CountryEntry], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, entries)?;
    Ok(())
}

/// Serializes fully in memory first, then replaces `path` atomically.
pub fn save_table(path: impl AsRef<Path>, entries: &[CountryEntry]) -> Result<()> {
    let path = path.as_ref();
    let mut buf = serde_json::to_vec_pretty(entries)?;
    buf.push(b'\n');
    common_io::write_atomic(path, &buf)?;
    info!(entries = entries.len(), "Wrote weighted table to {}", path.display());
    Ok(())
}

pub fn read_table<R: Read>(reader: R) -> Result<Vec<CountryEntry>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_table(path: impl AsRef<Path>) -> Result<Vec<CountryEntry>> {
    read_table(common_io::open_stream(path.as_ref())?)
}
