// crates/popweight-core/src/entry.rs

//! # Entry Builder
//!
//! Merges one resolved population row with its catalog record (required) and
//! gazetteer record (optional) into a [`CountryEntry`], and advances the
//! cumulative weight.
//!
//! Field fallback chains, first non-empty wins:
//!
//! | field           | chain                                              |
//! |-----------------|----------------------------------------------------|
//! | `capital`       | gazetteer capital, catalog primary capital         |
//! | `capitalLatLng` | catalog capital coordinates                        |
//! | `latLng`        | catalog country coordinates, `capitalLatLng`       |
//! | `region`        | catalog region, gazetteer continent                |
//! | `subregion`     | catalog subregion, gazetteer subregion             |
//! | `flagEmoji`     | catalog emoji, derived from catalog ISO-2          |
//! | `spotlightCity` | catalog primary capital                            |

use crate::model::{CatalogRecord, CountryEntry, Gazetteer, PopulationRow};
use crate::text::flag_emoji;
use std::num::NonZeroU64;

/// The accumulator threaded through the fold over population rows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FoldState {
    pub cumulative: f64,
}

/// Everything an entry needs besides the row itself. Fixed for a whole run.
#[derive(Clone, Copy, Debug)]
pub struct EntryBuilder<'a> {
    gazetteer: &'a Gazetteer,
    total_population: NonZeroU64,
}

impl<'a> EntryBuilder<'a> {
    pub fn new(gazetteer: &'a Gazetteer, total_population: NonZeroU64) -> Self {
        Self {
            gazetteer,
            total_population,
        }
    }

    /// `(state, row) -> (state', entry)`. Pure: same inputs, same outputs.
    pub fn build(
        &self,
        state: FoldState,
        iso3: &str,
        row: &PopulationRow,
        catalog: &CatalogRecord,
    ) -> (FoldState, CountryEntry) {
        let weight = row.population as f64 / self.total_population.get() as f64;
        let next = FoldState {
            cumulative: state.cumulative + weight,
        };

        let geo = self.gazetteer.get(iso3);
        let primary_capital = catalog.primary_capital().map(str::to_owned);

        let capital = geo
            .and_then(|g| g.capital.clone())
            .or_else(|| primary_capital.clone());
        let capital_lat_lng = catalog.capital_lat_lng;
        let lat_lng = catalog.lat_lng.or(capital_lat_lng);
        let region = catalog
            .region
            .clone()
            .or_else(|| geo.and_then(|g| g.continent.clone()));
        let subregion = catalog
            .subregion
            .clone()
            .or_else(|| geo.and_then(|g| g.subregion.clone()));
        let emoji = catalog
            .flag_emoji
            .clone()
            .or_else(|| catalog.iso2.as_deref().and_then(flag_emoji));

        let entry = CountryEntry {
            iso3: iso3.to_owned(),
            iso2: catalog.iso2.clone(),
            country: row.location.clone(),
            population: row.population,
            weight,
            cumulative_weight: next.cumulative,
            capital,
            capital_lat_lng,
            lat_lng,
            flag: catalog.flag_asset_url.clone(),
            flag_emoji: emoji,
            map_url: catalog.map_url.clone(),
            region,
            subregion,
            spotlight_city: primary_capital,
        };
        (next, entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GazetteerRecord;

    fn total(n: u64) -> NonZeroU64 {
        NonZeroU64::new(n).unwrap()
    }

    fn row(location: &str, population: u64) -> PopulationRow {
        PopulationRow {
            location: location.into(),
            iso3: None,
            loc_id: None,
            population,
        }
    }

    fn bare_catalog(iso3: &str, iso2: Option<&str>) -> CatalogRecord {
        CatalogRecord {
            iso3: iso3.into(),
            iso2: iso2.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn weight_and_cumulative_are_threaded() {
        let g = Gazetteer::new();
        let b = EntryBuilder::new(&g, total(400));
        let cat = bare_catalog("USA", Some("US"));
        let (s1, e1) = b.build(FoldState::default(), "USA", &row("USA", 100), &cat);
        let (s2, e2) = b.build(s1, "USA", &row("USA", 300), &cat);
        assert_eq!(e1.weight, 0.25);
        assert_eq!(e1.cumulative_weight, 0.25);
        assert_eq!(e2.weight, 0.75);
        assert_eq!(e2.cumulative_weight, 1.0);
        assert_eq!(s2.cumulative, 1.0);
    }

    #[test]
    fn build_is_pure() {
        let g = Gazetteer::new();
        let b = EntryBuilder::new(&g, total(10));
        let cat = bare_catalog("FRA", Some("FR"));
        let state = FoldState { cumulative: 0.5 };
        let first = b.build(state, "FRA", &row("France", 3), &cat);
        let second = b.build(state, "FRA", &row("France", 3), &cat);
        assert_eq!(first, second);
    }

    #[test]
    fn gazetteer_fills_gaps_catalog_leaves() {
        let g: Gazetteer = vec![GazetteerRecord {
            iso3: "FRA".into(),
            country: Some("France".into()),
            capital: Some("Paris".into()),
            continent: Some("EU".into()),
            subregion: Some("Western Europe".into()),
        }]
        .into_iter()
        .collect();
        let cat = CatalogRecord {
            capitals: vec!["Paris (catalog)".into()],
            capital_lat_lng: Some([48.87, 2.33]),
            region: Some("Europe".into()),
            ..bare_catalog("FRA", Some("FR"))
        };
        let (_, e) = EntryBuilder::new(&g, total(1)).build(
            FoldState::default(),
            "FRA",
            &row("France", 1),
            &cat,
        );
        assert_eq!(e.capital.as_deref(), Some("Paris"));
        assert_eq!(e.spotlight_city.as_deref(), Some("Paris (catalog)"));
        assert_eq!(e.region.as_deref(), Some("Europe"));
        assert_eq!(e.subregion.as_deref(), Some("Western Europe"));
        assert_eq!(e.lat_lng, Some([48.87, 2.33]));
        assert_eq!(e.flag_emoji.as_deref(), Some("🇫🇷"));
    }

    #[test]
    fn region_falls_back_to_gazetteer_continent() {
        let g: Gazetteer = vec![GazetteerRecord {
            iso3: "DEU".into(),
            country: Some("Germany".into()),
            continent: Some("EU".into()),
            subregion: Some("Central Europe".into()),
            ..Default::default()
        }]
        .into_iter()
        .collect();
        let cat = bare_catalog("DEU", Some("DE"));
        let (_, e) = EntryBuilder::new(&g, total(1)).build(
            FoldState::default(),
            "DEU",
            &row("Germany", 1),
            &cat,
        );
        assert_eq!(e.region.as_deref(), Some("EU"));
        assert_eq!(e.subregion.as_deref(), Some("Central Europe"));
    }

    #[test]
    fn catalog_only_entry_uses_catalog_capital() {
        let g = Gazetteer::new();
        let cat = CatalogRecord {
            capitals: vec!["Canberra".into()],
            lat_lng: Some([-27.0, 133.0]),
            capital_lat_lng: Some([-35.27, 149.13]),
            flag_emoji: Some("AU!".into()),
            ..bare_catalog("AUS", Some("AU"))
        };
        let (_, e) = EntryBuilder::new(&g, total(1)).build(
            FoldState::default(),
            "AUS",
            &row("Australia", 1),
            &cat,
        );
        assert_eq!(e.capital.as_deref(), Some("Canberra"));
        assert_eq!(e.lat_lng, Some([-27.0, 133.0]));
        assert_eq!(e.flag_emoji.as_deref(), Some("AU!"));
        assert_eq!(e.country, "Australia");
    }

    #[test]
    fn exhausted_chains_are_absent() {
        let g = Gazetteer::new();
        let cat = bare_catalog("ATA", Some("AQX"));
        let (_, e) = EntryBuilder::new(&g, total(1)).build(
            FoldState::default(),
            "ATA",
            &row("Antarctica", 1),
            &cat,
        );
        assert_eq!(e.capital, None);
        assert_eq!(e.capital_lat_lng, None);
        assert_eq!(e.lat_lng, None);
        assert_eq!(e.region, None);
        assert_eq!(e.flag_emoji, None);
        assert_eq!(e.spotlight_city, None);
        assert_eq!(e.iso2.as_deref(), Some("AQX"));
    }
}
