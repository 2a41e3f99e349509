// crates/popweight-core/src/loader/catalog.rs
use super::common_io;
use crate::error::Result;
use crate::model::convert::catalog_record;
use crate::model::raw::CatalogRaw;
use crate::model::Catalog;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Parses the REST Countries payload (a JSON array of country objects).
/// Objects without `cca3` are dropped.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Catalog> {
    let raw: Vec<CatalogRaw> = serde_json::from_reader(reader)?;
    Ok(raw.into_iter().filter_map(catalog_record).collect())
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    info!("Loading metadata catalog: {}", path.display());
    let catalog = parse_catalog(common_io::open_stream(path)?)?;
    info!(records = catalog.len(), "catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rest_countries_shape() {
        let json = r#"[
          {
            "name": {"common": "France", "official": "French Republic"},
            "cca2": "FR", "cca3": "FRA",
            "capital": ["Paris"],
            "capitalInfo": {"latlng": [48.87, 2.33]},
            "latlng": [46.0, 2.0],
            "region": "Europe", "subregion": "Western Europe",
            "flags": {
              "png": "https://flagcdn.com/w320/fr.png",
              "svg": "https://flagcdn.com/fr.svg",
              "alt": "..."
            },
            "flag": "🇫🇷",
            "maps": {
              "googleMaps": "https://goo.gl/maps/g7QxxSFsWyTPKuzd7",
              "openStreetMaps": "https://www.openstreetmap.org/relation/1403916"
            }
          },
          {
            "cca2": "AQ", "cca3": "ata", "capital": [], "capitalInfo": {},
            "latlng": [-90.0, 0.0], "region": "Antarctic"
          },
          {"cca2": "ZZ", "capital": null}
        ]"#;
        let catalog = parse_catalog(json.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);

        let fra = catalog.get("FRA").unwrap();
        assert_eq!(fra.iso2.as_deref(), Some("FR"));
        assert_eq!(fra.primary_capital(), Some("Paris"));
        assert_eq!(fra.capital_lat_lng, Some([48.87, 2.33]));
        assert_eq!(fra.flag_asset_url.as_deref(), Some("https://flagcdn.com/fr.svg"));
        assert_eq!(fra.map_url.as_deref(), Some("https://goo.gl/maps/g7QxxSFsWyTPKuzd7"));

        let ata = catalog.get("ATA").unwrap();
        assert!(ata.capitals.is_empty());
        assert_eq!(ata.capital_lat_lng, None);
        assert_eq!(ata.subregion, None);
    }

    #[test]
    fn non_array_payload_is_a_json_error() {
        let err = parse_catalog(r#"{"status": 404}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, crate::PopError::Json(_)));
    }
}
