// crates/popweight-core/src/loader/common_io.rs
use crate::error::{PopError, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;
#[cfg(feature = "compact")]
use std::io::Cursor;
#[cfg(feature = "compact")]
use zip::ZipArchive;

/// Local file header signature of a zip archive.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Opens a file without any decompression.
pub fn open_plain(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        PopError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;
    Ok(BufReader::new(file))
}

/// Opens a file, buffers it, and wraps it in a Gzip decoder when the name
/// ends in `.gz`. The caller doesn't care about the compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    decode_stream(open_plain(path)?, path)
}

/// Like [`open_stream`], but a zip archive (by extension or by signature, so
/// a download saved as `.csv` still works) yields one member: `member` when
/// given, otherwise the first `.csv` entry.
pub fn open_table(path: &Path, member: Option<&str>) -> Result<Box<dyn Read>> {
    let mut reader = open_plain(path)?;
    if is_zip(path) || reader.fill_buf()?.starts_with(ZIP_MAGIC) {
        return open_zip_member(reader, path, member);
    }
    decode_stream(reader, path)
}

fn decode_stream(reader: BufReader<File>, path: &Path) -> Result<Box<dyn Read>> {
    if !is_gzip(path) {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(PopError::InvalidData(format!(
            "{} is gzip-compressed but the 'compact' feature is disabled",
            path.display()
        )))
    }
}

#[cfg(feature = "compact")]
fn open_zip_member(
    reader: BufReader<File>,
    path: &Path,
    member: Option<&str>,
) -> Result<Box<dyn Read>> {
    let mut archive = ZipArchive::new(reader)?;
    let names: Vec<String> = archive.file_names().map(str::to_owned).collect();
    let target = match member.map(str::trim).filter(|m| !m.is_empty()) {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted || n.rsplit('/').next() == Some(wanted)),
        None => names.iter().find(|n| n.to_ascii_lowercase().ends_with(".csv")),
    };
    let Some(target) = target else {
        return Err(PopError::NotFound(format!(
            "No {} in zip archive {}",
            member.map_or_else(|| "CSV file".to_owned(), |m| format!("member '{m}'")),
            path.display()
        )));
    };

    let mut entry = archive.by_name(target)?;
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf)?;
    tracing::debug!(member = %target, bytes = buf.len(), "extracted {}", path.display());
    Ok(Box::new(Cursor::new(buf)))
}

#[cfg(not(feature = "compact"))]
fn open_zip_member(
    _reader: BufReader<File>,
    path: &Path,
    _member: Option<&str>,
) -> Result<Box<dyn Read>> {
    Err(PopError::InvalidData(format!(
        "{} is a zip archive but the 'compact' feature is disabled",
        path.display()
    )))
}

pub fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

pub fn is_zip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Sibling path used while writing, e.g. `table.json` -> `table.json.partial`.
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

/// Writes `bytes` next to `path` and renames into place, creating parent
/// directories. A failed write never leaves a truncated `path` behind.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = partial_path(path);
    if let Err(e) = fs::write(&tmp, bytes).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(PopError::Io(e));
    }
    Ok(())
}
