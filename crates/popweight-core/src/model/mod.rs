// crates/popweight-core/src/model/mod.rs
pub mod convert;
pub mod domain;
pub mod raw;

pub use domain::{
    Catalog, CatalogRecord, CountryEntry, Gazetteer, GazetteerRecord, LatLng, PopulationRow,
    WEIGHT_DECIMALS,
};
