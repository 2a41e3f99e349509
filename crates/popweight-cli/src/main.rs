//! popweight: builds the population-weighted country table
//!
//! Typical two-stage run, mirroring the data layout under `data/`:
//!
//! - Download the sources
//!   $ popweight fetch population --source-url <WPP csv url>
//!   $ popweight fetch geonames
//!   $ popweight fetch catalog
//!
//! - Normalize the population table (UN values are in thousands; a zipped
//!   WPP download is read through `--csv-name`)
//!   $ popweight normalize --year 2023 --value-scale 1000
//!
//! - Merge into `data/processed/country_stats.json`
//!   $ popweight merge
//!
//! Or in one pass without the intermediate CSV:
//!   $ popweight build --source data/raw/population_source.csv --value-scale 1000
//!
//! Settings are layered: built-in defaults, then `--config <file.toml>`, then
//! `POPWEIGHT_*` environment variables, then flags. `RUST_LOG` controls
//! logging; `-v` raises the default level to debug.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use clap::Parser;
use popweight_core::loader::load_table;
use popweight_core::{
    build_files, check_table, merge_files, normalize_file, FusionReport, NormalizeReport,
    PipelineConfig,
};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    match args.command {
        #[cfg(feature = "fetch")]
        Commands::Fetch { source } => fetch(source, &config)?,

        Commands::Normalize {
            source,
            download_to,
            csv_name,
            output,
            insecure,
            filters,
        } => {
            filters.apply(&mut config.normalize);
            if let Some(name) = csv_name {
                config.paths.csv_name = name;
            }
            let download_to = download_to.unwrap_or_else(|| config.paths.raw_population.clone());
            let source =
                source.unwrap_or_else(|| config.paths.raw_population.display().to_string());
            let source_path = resolve_source(&source, &download_to, insecure)?;
            let output = output.unwrap_or_else(|| config.paths.population_csv.clone());

            let member = Some(config.paths.csv_name.as_str());
            let report = normalize_file(&source_path, member, &output, &config.normalize)
                .with_context(|| format!("Failed to normalize {}", source_path.display()))?;
            print_normalize(&report);
            println!("Wrote {} normalized rows to {}", report.kept, output.display());
        }

        Commands::Merge {
            inputs,
            population_csv,
        } => {
            inputs.apply(&mut config.paths);
            if let Some(p) = population_csv {
                config.paths.population_csv = p;
            }
            let report = merge_files(&config).context("Merge failed")?;
            print_fusion(&report, &config.paths.output);
        }

        Commands::Build {
            inputs,
            source,
            csv_name,
            filters,
        } => {
            inputs.apply(&mut config.paths);
            filters.apply(&mut config.normalize);
            if let Some(p) = source {
                config.paths.raw_population = p;
            }
            if let Some(name) = csv_name {
                config.paths.csv_name = name;
            }
            let (normalized, fused) = build_files(&config).context("Build failed")?;
            print_normalize(&normalized);
            print_fusion(&fused, &config.paths.output);
        }

        Commands::Check { path } => {
            let path = path.unwrap_or_else(|| config.paths.output.clone());
            let table = load_table(&path)
                .with_context(|| format!("Failed to read table {}", path.display()))?;
            let issues = check_table(&table);
            if !issues.is_empty() {
                for issue in &issues {
                    eprintln!("- {issue}");
                }
                bail!("{} has {} invariant violation(s)", path.display(), issues.len());
            }
            println!("{}: {} entries, all invariants hold", path.display(), table.len());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "popweight=debug,popweight_core=debug"
    } else {
        "popweight=info,popweight_core=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(feature = "fetch")]
fn resolve_source(
    source: &str,
    download_to: &Path,
    insecure: bool,
) -> anyhow::Result<std::path::PathBuf> {
    use popweight_core::fetch::{resolve_population_source, FetchOptions};

    resolve_population_source(source, download_to, FetchOptions { insecure })
        .with_context(|| format!("Failed to obtain population source {source}"))
}

#[cfg(not(feature = "fetch"))]
fn resolve_source(
    source: &str,
    _download_to: &Path,
    _insecure: bool,
) -> anyhow::Result<std::path::PathBuf> {
    if source.starts_with("http://") || source.starts_with("https://") {
        bail!("{source} is a URL but popweight was built without the 'fetch' feature");
    }
    Ok(std::path::PathBuf::from(source))
}

#[cfg(feature = "fetch")]
fn fetch(source: args::FetchSource, config: &PipelineConfig) -> anyhow::Result<()> {
    use crate::args::FetchSource;
    use popweight_core::fetch::{
        download, fetch_catalog, FetchOptions, CATALOG_URL, GEONAMES_URL, POPULATION_URL,
    };

    match source {
        FetchSource::Population(a) => {
            let url = a.source_url.as_deref().unwrap_or(POPULATION_URL);
            let dest = a.output.unwrap_or_else(|| config.paths.raw_population.clone());
            let bytes = download(url, &dest, FetchOptions { insecure: a.insecure })
                .with_context(|| format!("Failed to download {url}"))?;
            println!("Saved population source ({bytes} bytes) to {}", dest.display());
        }
        FetchSource::Geonames(a) => {
            let url = a.source_url.as_deref().unwrap_or(GEONAMES_URL);
            let dest = a.output.unwrap_or_else(|| config.paths.geonames.clone());
            download(url, &dest, FetchOptions { insecure: a.insecure })
                .with_context(|| format!("Failed to download {url}"))?;
            println!("Saved GeoNames file to {}", dest.display());
        }
        FetchSource::Catalog(a) => {
            let url = a.source_url.as_deref().unwrap_or(CATALOG_URL);
            let dest = a.output.unwrap_or_else(|| config.paths.catalog.clone());
            let count = fetch_catalog(url, &dest, FetchOptions { insecure: a.insecure })
                .with_context(|| format!("Failed to download {url}"))?;
            println!("Saved {count} country metadata records to {}", dest.display());
        }
    }
    Ok(())
}

fn print_normalize(report: &NormalizeReport) {
    info!(?report, "normalize report");
    println!(
        "Population rows: {} seen, {} kept, {} dropped",
        report.rows_seen,
        report.kept,
        report.dropped()
    );
}

fn print_fusion(report: &FusionReport, output: &Path) {
    info!(?report, "fusion report");
    println!("Fusion statistics:");
    println!("  Population rows: {}", report.population_rows);
    println!("  Total population: {}", report.total_population);
    println!("  Unresolved: {}", report.unresolved);
    println!("  Missing catalog: {}", report.missing_catalog);
    println!("  Duplicates: {}", report.duplicates);
    println!("Wrote {} country records to {}", report.entries, output.display());
}
