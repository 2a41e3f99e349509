// crates/popweight-core/src/loader/population.rs
use super::common_io;
use crate::error::Result;
use crate::model::convert::{population_record, population_row};
use crate::model::raw::PopulationCsvRecord;
use crate::model::PopulationRow;
use crate::normalize::RawRow;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

// -----------------------------------------------------------------------------
// RAW SOURCE (either schema)
// -----------------------------------------------------------------------------

/// Reads a raw population CSV into header-keyed rows.
///
/// Malformed records are skipped with a warning; ragged rows are tolerated
/// (missing trailing cells are simply absent).
pub fn read_raw_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_owned())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(record = idx, "Skipping malformed row: {}", e);
                continue;
            }
        };
        rows.push(headers.iter().cloned().zip(record.iter()).collect());
    }
    Ok(rows)
}

/// Loads a raw population table from a plain, `.gz` or zip file.
///
/// `csv_name` picks the archive member; blank or `None` takes the first
/// `.csv` in the archive. It is ignored for non-archive files.
pub fn load_raw_population(
    path: impl AsRef<Path>,
    csv_name: Option<&str>,
) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    info!("Loading raw population: {}", path.display());
    read_raw_rows(common_io::open_table(path, csv_name)?)
}

// -----------------------------------------------------------------------------
// NORMALIZED CSV (loc_id,iso3,location,population)
// -----------------------------------------------------------------------------

/// Reads normalized rows. Rows with a blank, unparsable or zero population
/// are skipped.
pub fn read_population_csv<R: Read>(reader: R) -> Result<Vec<PopulationRow>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize::<PopulationCsvRecord>().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(record = idx, "Skipping malformed row: {}", e);
                continue;
            }
        };
        match population_row(record) {
            Some(row) => rows.push(row),
            None => debug!(record = idx, "population row without a usable population"),
        }
    }
    Ok(rows)
}

pub fn load_population_csv(path: impl AsRef<Path>) -> Result<Vec<PopulationRow>> {
    let path = path.as_ref();
    info!("Loading population CSV: {}", path.display());
    read_population_csv(common_io::open_stream(path)?)
}

pub fn write_population_csv<W: Write>(rows: &[PopulationRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(population_record(row))?;
    }
    if rows.is_empty() {
        wtr.write_record(["loc_id", "iso3", "location", "population"])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_population_csv(path: impl AsRef<Path>, rows: &[PopulationRow]) -> Result<()> {
    let mut buf = Vec::new();
    write_population_csv(rows, &mut buf)?;
    common_io::write_atomic(path.as_ref(), &buf)
}
