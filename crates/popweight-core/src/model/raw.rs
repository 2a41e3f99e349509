// crates/popweight-core/src/model/raw.rs
use serde::{Deserialize, Serialize};

/// Raw country object from the REST Countries payload.
/// NOTE: This type mirrors the external dataset; only the fields the fusion
/// reads are declared, everything else is ignored.
/// Arrays are `Option` because the API emits `null` as readily as `[]`.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogRaw {
    #[serde(default)]
    pub cca3: Option<String>,
    #[serde(default)]
    pub cca2: Option<String>,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(rename = "capitalInfo", default)]
    pub capital_info: Option<CapitalInfoRaw>,
    #[serde(default)]
    pub latlng: Option<Vec<f64>>,
    #[serde(default)]
    pub flags: Option<FlagsRaw>,
    /// Pre-rendered emoji, e.g. "🇫🇷".
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub maps: Option<MapsRaw>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
}

/// `{"latlng": [48.87, 2.33]}`, frequently just `{}`.
#[derive(Debug, Default, Deserialize)]
pub struct CapitalInfoRaw {
    #[serde(default)]
    pub latlng: Option<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlagsRaw {
    #[serde(default)]
    pub svg: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MapsRaw {
    #[serde(rename = "googleMaps", default)]
    pub google_maps: Option<String>,
}

/// One line of the normalized population CSV (`loc_id,iso3,location,population`).
///
/// Field order is the column order on write. All columns default to empty so
/// older files missing `loc_id` still load.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCsvRecord {
    #[serde(default)]
    pub loc_id: String,
    #[serde(default)]
    pub iso3: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub population: String,
}
