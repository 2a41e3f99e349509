// crates/popweight-core/src/lib.rs

//! # popweight-core
//!
//! Builds a population-weighted country table from three independently
//! shaped sources:
//!
//! - a population time series (UN WPP long format or a flat World Bank style CSV),
//! - the GeoNames gazetteer (`countryInfo.txt`),
//! - the REST Countries metadata catalog (capitals, flags, coordinates, maps).
//!
//! Each output entry carries `weight = population / total` and a running
//! `cumulativeWeight`, so a consumer can pick a country with a single binary
//! search over a uniform draw in `[0, 1)`. This crate builds the table only;
//! it does not draw.
//!
//! ```rust
//! use popweight_core::model::{Catalog, CatalogRecord, Gazetteer, PopulationRow};
//! use popweight_core::pipeline::fuse;
//!
//! let rows = vec![PopulationRow {
//!     location: "France".into(),
//!     iso3: Some("FRA".into()),
//!     loc_id: None,
//!     population: 67_000_000,
//! }];
//! let catalog: Catalog = vec![CatalogRecord {
//!     iso3: "FRA".into(),
//!     iso2: Some("FR".into()),
//!     ..Default::default()
//! }]
//! .into_iter()
//! .collect();
//!
//! let (table, report) = fuse(&rows, &Gazetteer::new(), &catalog)?;
//! assert_eq!(table[0].flag_emoji.as_deref(), Some("🇫🇷"));
//! assert_eq!(report.entries, 1);
//! # Ok::<(), popweight_core::PopError>(())
//! ```

pub mod check;
pub mod common;
pub mod config;
pub mod entry;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::check::{check_table, TableIssue};
pub use crate::common::{FusionReport, NormalizeReport};
pub use crate::config::{DataPaths, NormalizeOptions, PipelineConfig};
pub use crate::entry::{EntryBuilder, FoldState};
pub use crate::error::{PopError, Result};
pub use crate::model::{
    Catalog, CatalogRecord, CountryEntry, Gazetteer, GazetteerRecord, PopulationRow,
};
pub use crate::normalize::{normalize, RawRow};
pub use crate::pipeline::{build_files, fuse, merge_files, normalize_file};
