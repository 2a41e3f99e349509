//! Basic usage example for popweight-rs
//!
//! Builds a tiny weighted table fully in memory: two population layouts, a
//! GeoNames excerpt and a REST Countries excerpt.
//!
//! Run with: cargo run --example basic_usage

use popweight_rs::loader::{parse_catalog, parse_gazetteer, read_raw_rows, write_table};
use popweight_rs::{check_table, fuse, normalize, NormalizeOptions, Result};

const WPP: &str = "\
LocID,ISO3 Alpha-code,Location,Time,Variant,Sex,PopTotal
900,,World,2023,Medium,Both sexes,8045311.447
356,IND,India,2023,Medium,Both sexes,1428627.663
156,CHN,China,2023,Medium,Both sexes,1425671.352
360,,Indonesia,2023,Medium,Both sexes,277534.122
";

const GEONAMES: &str = "\
#ISO\tISO3\tISO-Numeric\tfips\tCountry\tCapital\tArea(in sq km)\tPopulation\tContinent
IN\tIND\t356\tIN\tIndia\tNew Delhi\t3287590\t1352617328\tAS
CN\tCHN\t156\tCH\tChina\tBeijing\t9596960\t1411778724\tAS
ID\tIDN\t360\tID\tIndonesia\tJakarta\t1919440\t267663435\tAS
";

const CATALOG: &str = r#"[
  {"cca2": "IN", "cca3": "IND", "capital": ["New Delhi"], "latlng": [20.0, 77.0], "region": "Asia"},
  {"cca2": "CN", "cca3": "CHN", "capital": ["Beijing"], "latlng": [35.0, 105.0], "region": "Asia"},
  {"cca2": "ID", "cca3": "IDN", "capital": ["Jakarta"], "latlng": [-5.0, 120.0], "region": "Asia"}
]"#;

fn main() -> Result<()> {
    println!("=== popweight-rs Basic Usage ===\n");

    let raw = read_raw_rows(WPP.as_bytes())?;
    let opts = NormalizeOptions {
        value_scale: 1000.0,
        ..Default::default()
    };
    let (rows, normalized) = normalize(&raw, &opts);
    println!("Normalized {} of {} rows", normalized.kept, normalized.rows_seen);

    let gazetteer = parse_gazetteer(GEONAMES.as_bytes())?;
    let catalog = parse_catalog(CATALOG.as_bytes())?;
    let (table, report) = fuse(&rows, &gazetteer, &catalog)?;

    // "World" is unresolved but still in the denominator, so the weights
    // below sum to the share of the world these three countries hold.
    println!(
        "Fused {} entries ({} unresolved rows)\n",
        report.entries, report.unresolved
    );
    for e in &table {
        println!(
            "{} {:<10} pop {:>13}  weight {:.4}  cumulative {:.4}",
            e.flag_emoji.as_deref().unwrap_or("  "),
            e.country,
            e.population,
            e.weight,
            e.cumulative_weight
        );
    }

    println!("\nInvariant check:");
    for issue in check_table(&table) {
        println!("  - {issue}");
    }

    println!("\nJSON:");
    write_table(&table[..1], std::io::stdout())?;
    println!();
    Ok(())
}
