// crates/popweight-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (I/O, Decompression) and delegates to
//! per-source parsers. Every `load_*` opens a path through
//! [`common_io::open_stream`], so `.gz` inputs work everywhere when the
//! `compact` feature is on; every `parse_*`/`read_*` works on any reader.
//! The raw population source may also be a zip archive
//! ([`common_io::open_table`]).

pub mod catalog;
pub mod common_io;
pub mod gazetteer;
pub mod output;
pub mod population;

pub use catalog::{load_catalog, parse_catalog};
pub use gazetteer::{load_gazetteer, parse_gazetteer};
pub use output::{load_table, read_table, save_table, write_table};
pub use population::{
    load_population_csv, load_raw_population, read_population_csv, read_raw_rows,
    save_population_csv, write_population_csv,
};
