// crates/popweight-core/src/fetch.rs
#![cfg(feature = "fetch")]

//! Downloads the three raw datasets. Blocking, one request per dataset.

use crate::error::{PopError, Result};
use crate::loader::common_io;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use std::path::{Path, PathBuf};
use tracing::info;

pub const POPULATION_URL: &str =
    "https://raw.githubusercontent.com/datasets/population/master/data/population.csv";
pub const GEONAMES_URL: &str = "https://download.geonames.org/export/dump/countryInfo.txt";
pub const CATALOG_URL: &str = concat!(
    "https://restcountries.com/v3.1/all",
    "?fields=name,capital,capitalInfo,cca2,cca3,latlng,region,subregion,flags,maps",
);

const USER_AGENT: &str = concat!("popweight/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Skip TLS certificate verification (intercepting proxies).
    pub insecure: bool,
}

fn client(opts: FetchOptions) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(opts.insecure)
        .build()?)
}

/// Downloads `url` to `dest` verbatim. Returns the number of bytes written.
pub fn download(url: &str, dest: &Path, opts: FetchOptions) -> Result<usize> {
    info!("Downloading {} -> {}", url, dest.display());
    let bytes = client(opts)?.get(url).send()?.error_for_status()?.bytes()?;
    common_io::write_atomic(dest, &bytes)?;
    Ok(bytes.len())
}

/// Downloads the catalog, checks it is a JSON array, and stores it
/// pretty-printed. Returns the number of records.
pub fn fetch_catalog(url: &str, dest: &Path, opts: FetchOptions) -> Result<usize> {
    info!("Fetching country metadata from {}", url);
    let body = client(opts)?
        .get(url)
        .header(ACCEPT, "application/json")
        .send()?
        .error_for_status()?
        .bytes()?;
    let payload: Vec<serde_json::Value> = serde_json::from_slice(&body)?;
    let mut pretty = serde_json::to_vec_pretty(&payload)?;
    pretty.push(b'\n');
    common_io::write_atomic(dest, &pretty)?;
    Ok(payload.len())
}

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// A population source is either a URL (downloaded to `download_to`) or a
/// local path read in place.
pub fn resolve_population_source(
    source: &str,
    download_to: &Path,
    opts: FetchOptions,
) -> Result<PathBuf> {
    if is_remote(source) {
        download(source, download_to, opts)?;
        return Ok(download_to.to_path_buf());
    }
    let local = PathBuf::from(source);
    if !local.exists() {
        return Err(PopError::NotFound(format!(
            "Population source not found at {}",
            local.display()
        )));
    }
    Ok(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_sources_are_http_urls() {
        assert!(is_remote(POPULATION_URL));
        assert!(is_remote("http://example.org/pop.csv"));
        assert!(!is_remote("data/raw/population_source.csv"));
        assert!(!is_remote("httpdocs/pop.csv"));
    }

    #[test]
    fn missing_local_source_is_not_found() {
        let err = resolve_population_source(
            "/no/such/population.csv",
            Path::new("unused.csv"),
            FetchOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PopError::NotFound(_)));
    }
}
