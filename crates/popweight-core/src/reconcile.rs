// crates/popweight-core/src/reconcile.rs

//! # Key Reconciler
//!
//! Maps a population row to the ISO-3 join key. A code on the row is trusted
//! as-is (uppercased); otherwise the location name is looked up in the
//! gazetteer, case-insensitively, first match in gazetteer order.

use crate::model::{Gazetteer, PopulationRow};
use crate::text::{fold_case, non_empty};
use crate::traits::{NameLookup, NameMatch};
use std::collections::HashMap;

/// Linear scan. A few hundred records, so this is fine per row.
impl NameLookup for Gazetteer {
    fn iso3_for_name(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|record| record.is_named(name))
            .map(|record| record.iso3.as_str())
    }
}

/// Folded country name -> ISO-3, built once from a gazetteer.
///
/// Keeps the first ISO-3 seen for each name, which is exactly what the scan
/// over [`Gazetteer`] returns.
#[derive(Clone, Debug, Default)]
pub struct NameIndex {
    by_name: HashMap<String, String>,
}

impl NameIndex {
    pub fn build(gazetteer: &Gazetteer) -> Self {
        let mut by_name = HashMap::with_capacity(gazetteer.len());
        for record in gazetteer.iter() {
            if let Some(name) = record.country.as_deref().and_then(non_empty) {
                by_name
                    .entry(fold_case(name))
                    .or_insert_with(|| record.iso3.clone());
            }
        }
        Self { by_name }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl NameLookup for NameIndex {
    fn iso3_for_name(&self, name: &str) -> Option<&str> {
        let name = non_empty(name)?;
        self.by_name.get(&fold_case(name)).map(String::as_str)
    }
}

/// Resolves the ISO-3 code of a row, or `None` if the caller must skip it.
pub fn resolve_iso3<L: NameLookup + ?Sized>(row: &PopulationRow, lookup: &L) -> Option<String> {
    if let Some(code) = row.iso3.as_deref().and_then(non_empty) {
        return Some(code.to_uppercase());
    }
    lookup.iso3_for_name(&row.location).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GazetteerRecord;

    fn gazetteer() -> Gazetteer {
        [
            ("FRA", "France"),
            ("COD", "Congo"),
            ("COG", "Congo"),
            ("XXX", ""),
        ]
        .into_iter()
        .map(|(iso3, name)| GazetteerRecord {
            iso3: iso3.into(),
            country: Some(name.into()),
            ..Default::default()
        })
        .collect()
    }

    fn row(iso3: Option<&str>, location: &str) -> PopulationRow {
        PopulationRow {
            location: location.into(),
            iso3: iso3.map(Into::into),
            loc_id: None,
            population: 1,
        }
    }

    #[test]
    fn explicit_code_is_uppercased_and_trusted() {
        let g = gazetteer();
        assert_eq!(resolve_iso3(&row(Some("usa"), "France"), &g).as_deref(), Some("USA"));
    }

    #[test]
    fn blank_code_falls_back_to_name() {
        let g = gazetteer();
        assert_eq!(resolve_iso3(&row(None, "france"), &g).as_deref(), Some("FRA"));
        assert_eq!(resolve_iso3(&row(Some("  "), "FRANCE"), &g).as_deref(), Some("FRA"));
        assert_eq!(resolve_iso3(&row(None, "Atlantis"), &g), None);
    }

    #[test]
    fn name_collision_takes_first_in_gazetteer_order() {
        let g = gazetteer();
        assert_eq!(g.iso3_for_name("congo"), Some("COD"));
        assert_eq!(NameIndex::build(&g).iso3_for_name("CONGO"), Some("COD"));
    }

    #[test]
    fn empty_location_never_matches() {
        let g = gazetteer();
        assert_eq!(resolve_iso3(&row(None, ""), &g), None);
        assert_eq!(resolve_iso3(&row(None, ""), &NameIndex::build(&g)), None);
    }

    #[test]
    fn padded_names_resolve_the_same_way_in_scan_and_index() {
        let g: Gazetteer = [("FRA", " France "), ("DEU", "Germany")]
            .into_iter()
            .map(|(iso3, name)| GazetteerRecord {
                iso3: iso3.into(),
                country: Some(name.into()),
                ..Default::default()
            })
            .collect();
        let idx = NameIndex::build(&g);
        for name in ["France", " france", "GERMANY ", "Spain"] {
            assert_eq!(idx.iso3_for_name(name), g.iso3_for_name(name), "{name:?}");
        }
        assert_eq!(g.iso3_for_name("France"), Some("FRA"));
    }

    #[test]
    fn index_agrees_with_scan() {
        let g = gazetteer();
        let idx = NameIndex::build(&g);
        assert_eq!(idx.len(), 2);
        for name in ["France", "fRANCE", "Congo", "Atlantis", " "] {
            assert_eq!(idx.iso3_for_name(name), g.iso3_for_name(name), "{name:?}");
        }
    }
}
