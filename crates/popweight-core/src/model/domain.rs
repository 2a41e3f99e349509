// crates/popweight-core/src/model/domain.rs
use crate::text::non_empty;
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// `[latitude, longitude]` as published by the catalog.
pub type LatLng = [f64; 2];

/// Decimal places kept for `weight` / `cumulativeWeight` in the JSON output.
pub const WEIGHT_DECIMALS: i32 = 8;

/// A normalized population row.
///
/// Produced by the normalizer or read back from the normalized CSV.
/// `population` is always strictly positive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopulationRow {
    pub location: String,
    pub iso3: Option<String>,
    pub loc_id: Option<String>,
    pub population: u64,
}

/// One line of GeoNames `countryInfo.txt`, reduced to the fields the fusion uses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GazetteerRecord {
    pub iso3: String,
    pub country: Option<String>,
    pub capital: Option<String>,
    pub continent: Option<String>,
    pub subregion: Option<String>,
}

impl NameMatch for GazetteerRecord {
    fn name_str(&self) -> &str {
        self.country.as_deref().unwrap_or("")
    }
}

/// The gazetteer keyed by ISO-3.
///
/// Iteration follows first appearance of each key. Re-inserting a key
/// replaces the record in place (last occurrence wins, position kept), so a
/// name scan over [`Gazetteer::iter`] is deterministic.
#[derive(Clone, Debug, Default)]
pub struct Gazetteer {
    records: Vec<GazetteerRecord>,
    by_iso3: HashMap<String, usize>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mut record: GazetteerRecord) {
        record.iso3 = record.iso3.to_uppercase();
        match self.by_iso3.get(&record.iso3) {
            Some(&idx) => self.records[idx] = record,
            None => {
                self.by_iso3.insert(record.iso3.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, iso3: &str) -> Option<&GazetteerRecord> {
        self.by_iso3
            .get(&iso3.to_uppercase())
            .map(|&idx| &self.records[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &GazetteerRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<GazetteerRecord> for Gazetteer {
    fn from_iter<I: IntoIterator<Item = GazetteerRecord>>(iter: I) -> Self {
        let mut gazetteer = Gazetteer::new();
        for record in iter {
            gazetteer.insert(record);
        }
        gazetteer
    }
}

/// A metadata catalog entry. Empty strings from the source are already `None`,
/// except inside `capitals`, which keeps the source positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogRecord {
    pub iso3: String,
    pub iso2: Option<String>,
    /// Ordered and trimmed; the first element is the primary capital.
    pub capitals: Vec<String>,
    pub capital_lat_lng: Option<LatLng>,
    pub lat_lng: Option<LatLng>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub flag_asset_url: Option<String>,
    pub flag_emoji: Option<String>,
    pub map_url: Option<String>,
}

impl CatalogRecord {
    /// The first capital, or `None` when it is missing or blank.
    pub fn primary_capital(&self) -> Option<&str> {
        self.capitals.first().and_then(|c| non_empty(c))
    }
}

/// The metadata catalog keyed by ISO-3 (last occurrence wins).
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    by_iso3: HashMap<String, CatalogRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mut record: CatalogRecord) {
        record.iso3 = record.iso3.to_uppercase();
        self.by_iso3.insert(record.iso3.clone(), record);
    }

    pub fn get(&self, iso3: &str) -> Option<&CatalogRecord> {
        self.by_iso3.get(&iso3.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.by_iso3.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_iso3.is_empty()
    }
}

impl FromIterator<CatalogRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogRecord>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}

/// One row of the weighted sampling table.
///
/// Field order here is the JSON field order. Absent optional fields are
/// written as `null` so every object carries the same keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryEntry {
    pub iso3: String,
    pub iso2: Option<String>,
    pub country: String,
    pub population: u64,
    #[serde(serialize_with = "serialize_weight")]
    pub weight: f64,
    #[serde(serialize_with = "serialize_weight")]
    pub cumulative_weight: f64,
    pub capital: Option<String>,
    pub capital_lat_lng: Option<LatLng>,
    pub lat_lng: Option<LatLng>,
    pub flag: Option<String>,
    pub flag_emoji: Option<String>,
    pub map_url: Option<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub spotlight_city: Option<String>,
}

/// Rounds to [`WEIGHT_DECIMALS`] on the way out; in-memory values stay exact.
fn serialize_weight<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let scale = 10f64.powi(WEIGHT_DECIMALS);
    serializer.serialize_f64((value * scale).round() / scale)
}
