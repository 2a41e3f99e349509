// crates/popweight-core/src/model/convert.rs
use crate::model::domain::{CatalogRecord, LatLng, PopulationRow};
use crate::model::raw::{CatalogRaw, PopulationCsvRecord};
use crate::text::non_empty;

/// **Catalog Converter:** Raw -> Record.
///
/// Returns `None` when the object carries no `cca3`; such objects cannot be
/// joined and are dropped by the loader.
pub fn catalog_record(raw: CatalogRaw) -> Option<CatalogRecord> {
    let iso3 = raw.cca3.as_deref().and_then(non_empty)?.to_uppercase();

    // Positional: a blank first capital stays first and reads as absent.
    let capitals: Vec<String> = raw
        .capital
        .unwrap_or_default()
        .into_iter()
        .map(|c| c.trim().to_owned())
        .collect();

    Some(CatalogRecord {
        iso3,
        iso2: raw.cca2.as_deref().and_then(non_empty).map(str::to_owned),
        capitals,
        capital_lat_lng: raw.capital_info.and_then(|info| info.latlng).and_then(lat_lng),
        lat_lng: raw.latlng.and_then(lat_lng),
        region: raw.region.as_deref().and_then(non_empty).map(str::to_owned),
        subregion: raw.subregion.as_deref().and_then(non_empty).map(str::to_owned),
        flag_asset_url: raw
            .flags
            .and_then(|f| f.svg)
            .as_deref()
            .and_then(non_empty)
            .map(str::to_owned),
        flag_emoji: raw.flag.as_deref().and_then(non_empty).map(str::to_owned),
        map_url: raw
            .maps
            .and_then(|m| m.google_maps)
            .as_deref()
            .and_then(non_empty)
            .map(str::to_owned),
    })
}

/// Only a `[lat, lng]` pair counts as a coordinate; anything else is absent.
fn lat_lng(values: Vec<f64>) -> Option<LatLng> {
    match values.as_slice() {
        [lat, lng] => Some([*lat, *lng]),
        _ => None,
    }
}

/// **CSV Converter:** Record -> Row.
///
/// `None` for a blank, unparsable or zero population.
pub fn population_row(record: PopulationCsvRecord) -> Option<PopulationRow> {
    let population: u64 = non_empty(&record.population)?.parse().ok()?;
    if population == 0 {
        return None;
    }
    Some(PopulationRow {
        location: record.location.trim().to_owned(),
        iso3: non_empty(&record.iso3).map(str::to_owned),
        loc_id: non_empty(&record.loc_id).map(str::to_owned),
        population,
    })
}

/// **CSV Converter:** Row -> Record.
pub fn population_record(row: &PopulationRow) -> PopulationCsvRecord {
    PopulationCsvRecord {
        loc_id: row.loc_id.clone().unwrap_or_default(),
        iso3: row.iso3.clone().unwrap_or_default(),
        location: row.location.clone(),
        population: row.population.to_string(),
    }
}
