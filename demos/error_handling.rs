//! Error handling example for popweight-rs
//!
//! Fatal errors abort a run; row-level problems are only counted.

use popweight_rs::loader::load_gazetteer;
use popweight_rs::{fuse, Catalog, Gazetteer, PopError, PopulationRow};

fn main() {
    println!("=== popweight-rs Error Handling Example ===\n");

    // Example 1: a missing input is fatal
    println!("--- Example 1: Missing gazetteer file ---");
    match load_gazetteer("does/not/exist/countryInfo.txt") {
        Ok(g) => println!("  Loaded {} records", g.len()),
        Err(PopError::NotFound(msg)) => println!("  ✗ {msg}"),
        Err(e) => println!("  ✗ unexpected: {e}"),
    }
    println!();

    // Example 2: no population at all cannot be weighted
    println!("--- Example 2: Empty population ---");
    match fuse(&[], &Gazetteer::new(), &Catalog::new()) {
        Ok(_) => println!("  unexpected success"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    // Example 3: unjoinable rows are skipped, not errors
    println!("--- Example 3: Rows that cannot be joined ---");
    let rows = vec![
        PopulationRow {
            location: "Atlantis".into(),
            iso3: None,
            loc_id: None,
            population: 1_000,
        },
        PopulationRow {
            location: "Narnia".into(),
            iso3: Some("NRN".into()),
            loc_id: None,
            population: 2_000,
        },
    ];
    match fuse(&rows, &Gazetteer::new(), &Catalog::new()) {
        Ok((table, report)) => {
            println!("  ✓ {} entries", table.len());
            println!("    unresolved: {}", report.unresolved);
            println!("    missing catalog: {}", report.missing_catalog);
        }
        Err(e) => println!("  ✗ {e}"),
    }
}
