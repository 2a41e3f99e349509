// crates/popweight-core/src/normalize.rs

//! # Population Schema Normalizer
//!
//! Two population layouts are accepted:
//!
//! - **time-series** (UN WPP): `Time`, `Variant`, `Sex`, `PopTotal`/`Pop1Jan`/
//!   `Pop1Jul`/`Value`, `ISO3 Alpha-code`/`ISO3`, `Location`, `LocID`;
//! - **flat** (World Bank / datasets): `Year`, `Value`/`population`,
//!   `Country Code`, `Country Name`.
//!
//! [`classify`] turns a raw row into a [`SourceRow`] once; everything after
//! that matches on the tag.

use crate::common::NormalizeReport;
use crate::config::NormalizeOptions;
use crate::model::PopulationRow;
use crate::text::{equals_folded, non_empty};
use std::collections::HashMap;
use tracing::{debug, info};

const TIME_COLUMN: &str = "Time";
const YEAR_COLUMN: &str = "Year";
const VARIANT_COLUMN: &str = "Variant";
const SEX_COLUMN: &str = "Sex";
const LOC_ID_COLUMN: &str = "LocID";

/// Candidate population columns of the time-series schema, in priority order.
const TIME_SERIES_VALUE_COLUMNS: [&str; 4] = ["PopTotal", "Pop1Jan", "Pop1Jul", "Value"];
const TIME_SERIES_ISO3_COLUMNS: [&str; 2] = ["ISO3 Alpha-code", "ISO3"];
const TIME_SERIES_LOCATION_COLUMN: &str = "Location";

const FLAT_VALUE_COLUMNS: [&str; 2] = ["Value", "population"];
const FLAT_ISO3_COLUMN: &str = "Country Code";
const FLAT_LOCATION_COLUMN: &str = "Country Name";

/// A raw population source row: column name -> cell text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow(HashMap<String, String>);

impl RawRow {
    /// Trimmed cell value; blank and missing cells are both `None`.
    pub fn field(&self, column: &str) -> Option<&str> {
        self.0.get(column).and_then(|v| non_empty(v))
    }

    /// First non-blank cell among `columns`.
    pub fn first_field(&self, columns: &[&str]) -> Option<&str> {
        columns.iter().find_map(|c| self.field(c))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawRow(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// UN WPP style row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeSeriesRow<'a> {
    pub time: &'a str,
    pub variant: Option<&'a str>,
    pub sex: Option<&'a str>,
    pub value: Option<&'a str>,
    pub iso3: Option<&'a str>,
    pub location: Option<&'a str>,
    pub loc_id: Option<&'a str>,
}

/// World Bank style row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatRow<'a> {
    pub year: &'a str,
    pub value: Option<&'a str>,
    pub iso3: Option<&'a str>,
    pub location: Option<&'a str>,
    pub loc_id: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceRow<'a> {
    TimeSeries(TimeSeriesRow<'a>),
    Flat(FlatRow<'a>),
}

/// Why a raw row did not make it into the normalized output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    UnknownSchema,
    Variant,
    Sex,
    Year,
    MissingValue,
    BadValue,
    NonPositive,
}

/// Detects the schema of a row. A non-blank `Time` wins over `Year`.
pub fn classify(row: &RawRow) -> Option<SourceRow<'_>> {
    let loc_id = row.field(LOC_ID_COLUMN);
    if let Some(time) = row.field(TIME_COLUMN) {
        return Some(SourceRow::TimeSeries(TimeSeriesRow {
            time,
            variant: row.field(VARIANT_COLUMN),
            sex: row.field(SEX_COLUMN),
            value: row.first_field(&TIME_SERIES_VALUE_COLUMNS),
            iso3: row.first_field(&TIME_SERIES_ISO3_COLUMNS),
            location: row.field(TIME_SERIES_LOCATION_COLUMN),
            loc_id,
        }));
    }
    if let Some(year) = row.field(YEAR_COLUMN) {
        return Some(SourceRow::Flat(FlatRow {
            year,
            value: row.first_field(&FLAT_VALUE_COLUMNS),
            iso3: row.field(FLAT_ISO3_COLUMN),
            location: row.field(FLAT_LOCATION_COLUMN),
            loc_id,
        }));
    }
    None
}

/// Applies filters and scaling to one classified row.
pub fn normalize_row(
    row: &SourceRow<'_>,
    opts: &NormalizeOptions,
) -> Result<PopulationRow, DropReason> {
    let (value, iso3, location, loc_id) = match row {
        SourceRow::TimeSeries(ts) => {
            if ts.variant.is_some_and(|v| !equals_folded(v, opts.variant.trim())) {
                return Err(DropReason::Variant);
            }
            if ts.sex.is_some_and(|s| !equals_folded(s, opts.sex.trim())) {
                return Err(DropReason::Sex);
            }
            if !year_matches(ts.time, opts.year) {
                return Err(DropReason::Year);
            }
            (ts.value, ts.iso3, ts.location, ts.loc_id)
        }
        SourceRow::Flat(flat) => {
            if !year_matches(flat.year, opts.year) {
                return Err(DropReason::Year);
            }
            (flat.value, flat.iso3, flat.location, flat.loc_id)
        }
    };

    let value = value.ok_or(DropReason::MissingValue)?;
    let population = scale_population(value, opts.value_scale)?;

    Ok(PopulationRow {
        location: location.unwrap_or_default().to_owned(),
        iso3: iso3.map(str::to_owned),
        loc_id: loc_id.map(str::to_owned),
        population,
    })
}

/// Normalizes a whole table, keeping input order.
pub fn normalize(
    rows: &[RawRow],
    opts: &NormalizeOptions,
) -> (Vec<PopulationRow>, NormalizeReport) {
    let mut report = NormalizeReport {
        rows_seen: rows.len(),
        ..Default::default()
    };
    let mut out = Vec::new();

    for (line, raw) in rows.iter().enumerate() {
        let result = classify(raw)
            .ok_or(DropReason::UnknownSchema)
            .and_then(|row| normalize_row(&row, opts));
        match result {
            Ok(row) => out.push(row),
            Err(reason) => {
                debug!(row = line, ?reason, "dropping population row");
                report.record_drop(reason);
            }
        }
    }

    report.kept = out.len();
    info!(
        seen = report.rows_seen,
        kept = report.kept,
        year = opts.year,
        "normalized population rows"
    );
    (out, report)
}

fn year_matches(cell: &str, year: i32) -> bool {
    cell.parse::<f64>()
        .is_ok_and(|v| v.is_finite() && v.round() == f64::from(year))
}

/// `round(value * scale)`, ties to even. Must end up strictly positive.
fn scale_population(value: &str, scale: f64) -> Result<u64, DropReason> {
    let parsed: f64 = value.parse().map_err(|_| DropReason::BadValue)?;
    let scaled = (parsed * scale).round_ties_even();
    if !scaled.is_finite() || scaled >= u64::MAX as f64 {
        return Err(DropReason::BadValue);
    }
    if scaled <= 0.0 {
        return Err(DropReason::NonPositive);
    }
    Ok(scaled as u64)
}
