// crates/popweight-core/src/pipeline.rs

//! # Pipeline Driver
//!
//! Folds normalized population rows into the weighted table:
//!
//! 1. `totalPopulation` is fixed up front over **all** rows; rows later
//!    skipped still count, so skipping never inflates another weight.
//! 2. Each row is resolved to an ISO-3, joined with the catalog and built
//!    into an entry, threading [`FoldState`] from one row to the next.
//! 3. Rows that do not resolve, have no catalog record, or repeat an ISO-3
//!    already emitted are skipped.
//!
//! The `*_files` drivers load every input before fusing and only write once
//! fusion succeeded, so a fatal error leaves no output file.

use crate::common::{FusionReport, NormalizeReport};
use crate::config::{NormalizeOptions, PipelineConfig};
use crate::entry::{EntryBuilder, FoldState};
use crate::error::{PopError, Result};
use crate::loader;
use crate::model::{Catalog, CountryEntry, Gazetteer, PopulationRow};
use crate::normalize::normalize;
use crate::reconcile::{resolve_iso3, NameIndex};
use std::collections::HashSet;
use std::num::NonZeroU64;
use std::path::Path;
use tracing::{debug, info, warn};

/// Sum of every row's population, or `None` if it does not fit in a `u64`.
pub fn total_population(rows: &[PopulationRow]) -> Option<u64> {
    rows.iter().try_fold(0u64, |acc, r| acc.checked_add(r.population))
}

/// Builds the weighted table in input order.
///
/// Fails when the total population is zero or overflows `u64`.
pub fn fuse(
    rows: &[PopulationRow],
    gazetteer: &Gazetteer,
    catalog: &Catalog,
) -> Result<(Vec<CountryEntry>, FusionReport)> {
    let sum = total_population(rows).ok_or_else(|| {
        PopError::InvalidData(format!(
            "total population of {} rows overflows u64",
            rows.len()
        ))
    })?;
    let total = NonZeroU64::new(sum).ok_or(PopError::ZeroPopulation)?;
    let builder = EntryBuilder::new(gazetteer, total);
    let names = NameIndex::build(gazetteer);

    let mut report = FusionReport {
        population_rows: rows.len(),
        total_population: total.get(),
        ..Default::default()
    };
    let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
    let mut entries = Vec::with_capacity(rows.len());
    let mut state = FoldState::default();

    for row in rows {
        let Some(iso3) = resolve_iso3(row, &names) else {
            debug!(location = %row.location, "no ISO-3 for population row");
            report.unresolved += 1;
            continue;
        };
        let Some(record) = catalog.get(&iso3) else {
            debug!(%iso3, location = %row.location, "no catalog record");
            report.missing_catalog += 1;
            continue;
        };
        if seen.contains(&iso3) {
            warn!(%iso3, location = %row.location, "duplicate ISO-3, keeping the first row");
            report.duplicates += 1;
            continue;
        }

        let (next, entry) = builder.build(state, &iso3, row, record);
        state = next;
        seen.insert(iso3);
        entries.push(entry);
    }

    report.entries = entries.len();
    info!(
        rows = report.population_rows,
        entries = report.entries,
        unresolved = report.unresolved,
        missing_catalog = report.missing_catalog,
        duplicates = report.duplicates,
        total_population = report.total_population,
        cumulative = state.cumulative,
        "fused weighted table"
    );
    Ok((entries, report))
}

// -----------------------------------------------------------------------------
// FILE DRIVERS
// -----------------------------------------------------------------------------

/// Raw population file -> normalized CSV.
///
/// `csv_name` selects the member when `source` is a zip archive.
pub fn normalize_file(
    source: &Path,
    csv_name: Option<&str>,
    output: &Path,
    opts: &NormalizeOptions,
) -> Result<NormalizeReport> {
    let raw = loader::load_raw_population(source, csv_name)?;
    let (rows, report) = normalize(&raw, opts);
    loader::save_population_csv(output, &rows)?;
    info!(rows = rows.len(), "Wrote normalized population to {}", output.display());
    Ok(report)
}

/// Normalized CSV + gazetteer + catalog -> weighted table.
pub fn merge_files(config: &PipelineConfig) -> Result<FusionReport> {
    let paths = &config.paths;
    let rows = loader::load_population_csv(&paths.population_csv)?;
    write_fused(&rows, config)
}

/// Raw population + gazetteer + catalog -> weighted table, no intermediate file.
pub fn build_files(config: &PipelineConfig) -> Result<(NormalizeReport, FusionReport)> {
    let paths = &config.paths;
    let raw = loader::load_raw_population(&paths.raw_population, Some(paths.csv_name.as_str()))?;
    let (rows, normalized) = normalize(&raw, &config.normalize);
    let fused = write_fused(&rows, config)?;
    Ok((normalized, fused))
}

fn write_fused(rows: &[PopulationRow], config: &PipelineConfig) -> Result<FusionReport> {
    let gazetteer = loader::load_gazetteer(&config.paths.geonames)?;
    let catalog = loader::load_catalog(&config.paths.catalog)?;
    let (entries, report) = fuse(rows, &gazetteer, &catalog)?;
    loader::save_table(&config.paths.output, &entries)?;
    Ok(report)
}
