// crates/popweight-core/src/common.rs

//! Run reports returned next to the data they describe.
//!
//! The counts reflect what each stage kept and why it skipped the rest; they
//! are logged by the drivers and printed by the CLI.

use crate::normalize::DropReason;
use serde::Serialize;

/// Outcome of [`normalize`](crate::normalize::normalize).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub rows_seen: usize,
    pub kept: usize,
    pub unknown_schema: usize,
    pub variant_mismatch: usize,
    pub sex_mismatch: usize,
    pub year_mismatch: usize,
    pub missing_value: usize,
    pub bad_value: usize,
    pub non_positive: usize,
}

impl NormalizeReport {
    pub fn record_drop(&mut self, reason: DropReason) {
        let slot = match reason {
            DropReason::UnknownSchema => &mut self.unknown_schema,
            DropReason::Variant => &mut self.variant_mismatch,
            DropReason::Sex => &mut self.sex_mismatch,
            DropReason::Year => &mut self.year_mismatch,
            DropReason::MissingValue => &mut self.missing_value,
            DropReason::BadValue => &mut self.bad_value,
            DropReason::NonPositive => &mut self.non_positive,
        };
        *slot += 1;
    }

    pub fn dropped(&self) -> usize {
        self.unknown_schema
            + self.variant_mismatch
            + self.sex_mismatch
            + self.year_mismatch
            + self.missing_value
            + self.bad_value
            + self.non_positive
    }
}

/// Outcome of [`fuse`](crate::pipeline::fuse).
///
/// `total_population` is the weight denominator: it covers every input row,
/// including the ones counted as unresolved, missing from the catalog or
/// duplicated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FusionReport {
    pub population_rows: usize,
    pub total_population: u64,
    pub unresolved: usize,
    pub missing_catalog: usize,
    pub duplicates: usize,
    pub entries: usize,
}

impl FusionReport {
    pub fn skipped(&self) -> usize {
        self.unresolved + self.missing_catalog + self.duplicates
    }
}
