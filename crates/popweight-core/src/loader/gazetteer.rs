// crates/popweight-core/src/loader/gazetteer.rs

//! GeoNames `countryInfo.txt` reader.
//!
//! Tab-separated, `#` comment lines, and the last comment line before the data
//! holds the column names:
//!
//! ```text
//! #ISO	ISO3	ISO-Numeric	fips	Country	Capital	Area(in sq km)	Population	Continent	...
//! FR	FRA	250	FR	France	Paris	547030	66987244	EU	...
//! ```

use super::common_io;
use crate::error::Result;
use crate::model::{Gazetteer, GazetteerRecord};
use crate::text::non_empty;
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

const ISO3_COLUMN: &str = "ISO3";
const COUNTRY_COLUMN: &str = "Country";
const CAPITAL_COLUMN: &str = "Capital";
const CONTINENT_COLUMN: &str = "Continent";
const SUBREGION_COLUMN: &str = "Subregion";

pub fn parse_gazetteer<R: BufRead>(reader: R) -> Result<Gazetteer> {
    let mut header: Vec<String> = Vec::new();
    let mut gazetteer = Gazetteer::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(comment) = line.strip_prefix('#') {
            header = comment.trim().split('\t').map(|h| h.trim().to_owned()).collect();
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let cells: HashMap<&str, &str> = header
            .iter()
            .map(String::as_str)
            .zip(line.split('\t'))
            .collect();
        let field = |column: &str| {
            cells
                .get(column)
                .and_then(|v| non_empty(v))
                .map(str::to_owned)
        };

        let Some(iso3) = field(ISO3_COLUMN) else {
            debug!(line = idx + 1, "gazetteer line without ISO3");
            continue;
        };
        gazetteer.insert(GazetteerRecord {
            iso3,
            country: field(COUNTRY_COLUMN),
            capital: field(CAPITAL_COLUMN),
            continent: field(CONTINENT_COLUMN),
            subregion: field(SUBREGION_COLUMN),
        });
    }
    Ok(gazetteer)
}

pub fn load_gazetteer(path: impl AsRef<Path>) -> Result<Gazetteer> {
    let path = path.as_ref();
    info!("Loading gazetteer: {}", path.display());
    let gazetteer = parse_gazetteer(BufReader::new(common_io::open_stream(path)?))?;
    info!(records = gazetteer.len(), "gazetteer loaded");
    Ok(gazetteer)
}
