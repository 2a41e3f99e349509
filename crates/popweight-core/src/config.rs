// crates/popweight-core/src/config.rs

//! # Pipeline Configuration
//!
//! Plain values consumed by the normalizer and the file-level drivers.
//! Every struct is `#[serde(default)]`, so a TOML file only needs the keys it
//! wants to override:
//!
//! ```toml
//! [normalize]
//! year = 2022
//! value_scale = 1000.0
//!
//! [paths]
//! output = "public/country_stats.json"
//! ```

use crate::error::Result;
use crate::loader::common_io;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Filters and scaling applied to raw population rows.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Target year; rows whose year column does not round to it are dropped.
    pub year: i32,
    /// Projection variant (time-series schema only), compared case-insensitively.
    pub variant: String,
    /// Sex filter (time-series schema only), compared case-insensitively.
    pub sex: String,
    /// Multiplier applied before rounding (UN data ships thousands).
    pub value_scale: f64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            year: 2023,
            variant: "Medium".to_owned(),
            sex: "Both sexes".to_owned(),
            value_scale: 1.0,
        }
    }
}

/// Locations of the pipeline inputs and outputs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// Raw population download (either schema), plain, gzip or zip.
    pub raw_population: PathBuf,
    /// CSV member to read when `raw_population` is a zip archive; blank takes
    /// the first `.csv` entry.
    pub csv_name: String,
    /// Normalized `loc_id,iso3,location,population` CSV.
    pub population_csv: PathBuf,
    /// GeoNames `countryInfo.txt`.
    pub geonames: PathBuf,
    /// REST Countries JSON payload.
    pub catalog: PathBuf,
    /// Final weighted table.
    pub output: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            raw_population: PathBuf::from("data/raw/population_source.csv"),
            csv_name: "WPP2022_TotalPopulationBySex.csv".to_owned(),
            population_csv: PathBuf::from("data/raw/un_population_2023.csv"),
            geonames: PathBuf::from("data/raw/countryInfo.txt"),
            catalog: PathBuf::from("data/raw/rest-countries.json"),
            output: PathBuf::from("data/processed/country_stats.json"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub normalize: NormalizeOptions,
    pub paths: DataPaths,
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a TOML config file. A missing file is a fatal `NotFound`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut text = String::new();
        common_io::open_plain(path.as_ref())?.read_to_string(&mut text)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, PipelineConfig::default());
        assert_eq!(cfg.normalize.variant, "Medium");
        assert_eq!(cfg.normalize.sex, "Both sexes");
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let cfg = PipelineConfig::from_toml_str(
            r#"
            [normalize]
            year = 2022
            value_scale = 1000.0

            [paths]
            output = "out/table.json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.normalize.year, 2022);
        assert_eq!(cfg.normalize.value_scale, 1000.0);
        assert_eq!(cfg.normalize.variant, "Medium");
        assert_eq!(cfg.paths.output, PathBuf::from("out/table.json"));
        assert_eq!(cfg.paths.geonames, PathBuf::from("data/raw/countryInfo.txt"));
        assert_eq!(cfg.paths.csv_name, "WPP2022_TotalPopulationBySex.csv");
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = PipelineConfig::from_toml_str("[normalize\nyear = ").unwrap_err();
        assert!(matches!(err, crate::PopError::Config(_)));
    }
}
