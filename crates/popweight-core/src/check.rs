// crates/popweight-core/src/check.rs

//! Invariant checks over a finished table, in memory or reloaded from disk.

use crate::model::CountryEntry;
use std::collections::HashSet;
use std::fmt;

/// Absolute tolerance for the weight sum and the final cumulative weight.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq)]
pub enum TableIssue {
    Empty,
    DuplicateIso3(String),
    WeightOutOfRange { iso3: String, weight: f64 },
    CumulativeDecreased { iso3: String, previous: f64, current: f64 },
    WeightSum(f64),
    FinalCumulative(f64),
}

impl fmt::Display for TableIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableIssue::Empty => write!(f, "table has no entries"),
            TableIssue::DuplicateIso3(iso3) => write!(f, "ISO-3 {iso3} appears more than once"),
            TableIssue::WeightOutOfRange { iso3, weight } => {
                write!(f, "{iso3}: weight {weight} outside (0, 1]")
            }
            TableIssue::CumulativeDecreased {
                iso3,
                previous,
                current,
            } => write!(f, "{iso3}: cumulative weight fell from {previous} to {current}"),
            TableIssue::WeightSum(sum) => write!(f, "weights sum to {sum}, expected 1.0"),
            TableIssue::FinalCumulative(last) => {
                write!(f, "final cumulative weight is {last}, expected 1.0")
            }
        }
    }
}

/// Returns every invariant violation found; an empty vec means the table is
/// usable for weighted selection.
pub fn check_table(entries: &[CountryEntry]) -> Vec<TableIssue> {
    let mut issues = Vec::new();
    let Some(last) = entries.last() else {
        issues.push(TableIssue::Empty);
        return issues;
    };

    let mut seen = HashSet::with_capacity(entries.len());
    let mut previous = 0.0_f64;
    for e in entries {
        if !seen.insert(e.iso3.as_str()) {
            issues.push(TableIssue::DuplicateIso3(e.iso3.clone()));
        }
        if !(e.weight > 0.0 && e.weight <= 1.0) {
            issues.push(TableIssue::WeightOutOfRange {
                iso3: e.iso3.clone(),
                weight: e.weight,
            });
        }
        if e.cumulative_weight < previous {
            issues.push(TableIssue::CumulativeDecreased {
                iso3: e.iso3.clone(),
                previous,
                current: e.cumulative_weight,
            });
        }
        previous = e.cumulative_weight;
    }

    let sum: f64 = entries.iter().map(|e| e.weight).sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        issues.push(TableIssue::WeightSum(sum));
    }
    if (last.cumulative_weight - 1.0).abs() > WEIGHT_TOLERANCE {
        issues.push(TableIssue::FinalCumulative(last.cumulative_weight));
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(iso3: &str, weight: f64, cumulative_weight: f64) -> CountryEntry {
        CountryEntry {
            iso3: iso3.into(),
            iso2: None,
            country: iso3.into(),
            population: 1,
            weight,
            cumulative_weight,
            capital: None,
            capital_lat_lng: None,
            lat_lng: None,
            flag: None,
            flag_emoji: None,
            map_url: None,
            region: None,
            subregion: None,
            spotlight_city: None,
        }
    }

    #[test]
    fn valid_table_has_no_issues() {
        let t = [entry("USA", 0.831, 0.831), entry("FRA", 0.169, 1.0)];
        assert!(check_table(&t).is_empty());
    }

    #[test]
    fn reports_each_violation() {
        let t = [entry("USA", 0.6, 0.6), entry("USA", 0.0, 0.5)];
        let issues = check_table(&t);
        assert!(issues.contains(&TableIssue::DuplicateIso3("USA".into())));
        assert!(issues.iter().any(|i| matches!(i, TableIssue::WeightOutOfRange { .. })));
        assert!(issues.iter().any(|i| matches!(i, TableIssue::CumulativeDecreased { .. })));
        assert!(issues.iter().any(|i| matches!(i, TableIssue::WeightSum(_))));
        assert!(issues.iter().any(|i| matches!(i, TableIssue::FinalCumulative(_))));
    }

    #[test]
    fn empty_table_is_an_issue() {
        assert_eq!(check_table(&[]), vec![TableIssue::Empty]);
    }
}
