//! popweight-cli
//! =============
//!
//! Command-line interface for `popweight-core`: downloads the population,
//! GeoNames and REST Countries datasets and fuses them into a
//! population-weighted country table.
//!
//! This crate primarily provides a binary (`popweight`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install popweight-cli
//! popweight fetch geonames
//! popweight fetch catalog
//! popweight build --source data/raw/population_source.csv --value-scale 1000
//! popweight check
//! ```
//!
//! For programmatic access to the pipeline, use the `popweight-core` crate
//! directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
