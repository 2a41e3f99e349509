#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use popweight_core::{DataPaths, NormalizeOptions, PipelineConfig};

/// UN WPP long format: aggregates, other variants and other years mixed in.
pub const WPP_CSV: &str = "\
SortOrder,LocID,Notes,ISO3 Alpha-code,ISO2 Alpha-code,Location,Time,Variant,Sex,PopTotal
1,900,,,,World,2023,Medium,Both sexes,8045311.447
2,840,,USA,US,United States of America,2023,Medium,Both sexes,330000
3,840,,USA,US,United States of America,2023,Low,Both sexes,329000
4,840,,USA,US,United States of America,2022,Medium,Both sexes,333287.557
5,250,,FRA,FR,France,2023,Medium,Both sexes,67000
6,383,,,,Kosovo,2023,Medium,Both sexes,1800
7,250,,,,France,2023,Medium,Female,34000
";

pub const GEONAMES_TXT: &str = "\
# GeoNames Country Info
#ISO\tISO3\tISO-Numeric\tfips\tCountry\tCapital\tArea(in sq km)\tPopulation\tContinent
US\tUSA\t840\tUS\tUnited States\tWashington\t9629091\t327167434\tNA
FR\tFRA\t250\tFR\tFrance\tParis\t547030\t66987244\tEU
XK\tXKX\t0\tKV\tKosovo\tPristina\t10908\t1845300\tEU
";

pub const CATALOG_JSON: &str = r#"[
  {"cca2": "US", "cca3": "USA", "capital": ["Washington, D.C."],
   "capitalInfo": {"latlng": [38.89, -77.05]}, "latlng": [38.0, -97.0],
   "region": "Americas", "subregion": "North America",
   "flags": {"svg": "https://flagcdn.com/us.svg"}, "flag": "🇺🇸",
   "maps": {"googleMaps": "https://goo.gl/maps/e8M246zY4BSjkjAv6"}},
  {"cca2": "FR", "cca3": "FRA", "capital": ["Paris"],
   "capitalInfo": {"latlng": [48.87, 2.33]}, "latlng": [46.0, 2.0],
   "region": "Europe", "subregion": "Western Europe",
   "flags": {"svg": "https://flagcdn.com/fr.svg"},
   "maps": {"googleMaps": "https://goo.gl/maps/g7QxxSFsWyTPKuzd7"}}
]"#;

pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Config pointing every path into `dir`, with the UN thousands scale.
pub fn config_in(dir: &Path) -> PipelineConfig {
    PipelineConfig {
        normalize: NormalizeOptions {
            value_scale: 1000.0,
            ..Default::default()
        },
        paths: DataPaths {
            raw_population: write(dir, "population_source.csv", WPP_CSV),
            population_csv: dir.join("un_population_2023.csv"),
            geonames: write(dir, "countryInfo.txt", GEONAMES_TXT),
            catalog: write(dir, "rest-countries.json", CATALOG_JSON),
            output: dir.join("processed").join("country_stats.json"),
            ..Default::default()
        },
    }
}

/// Writes a zip archive with the given `(name, contents)` members, stored
/// uncompressed.
#[cfg(feature = "compact")]
pub fn write_zip(dir: &Path, name: &str, members: &[(&str, &str)]) -> PathBuf {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let path = dir.join(name);
    let mut zip = zip::ZipWriter::new(fs::File::create(&path).unwrap());
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (member, contents) in members {
        zip.start_file(*member, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}
