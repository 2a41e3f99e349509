use clap::{Args, Parser, Subcommand};
use popweight_core::{DataPaths, NormalizeOptions};
use std::path::PathBuf;

/// CLI arguments for popweight
#[derive(Debug, Parser)]
#[command(
    name = "popweight",
    version,
    about = "Builds a population-weighted country table from population, \
             GeoNames and REST Countries data"
)]
pub struct CliArgs {
    /// TOML file with pipeline defaults ([normalize] and [paths] tables)
    #[arg(short = 'c', long = "config", global = true, env = "POPWEIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download one of the raw datasets
    #[cfg(feature = "fetch")]
    Fetch {
        #[command(subcommand)]
        source: FetchSource,
    },

    /// Filter and scale a raw population table into the normalized CSV
    Normalize {
        /// Raw population CSV (UN WPP or flat layout); a URL is downloaded first
        #[arg(long = "source", env = "POPWEIGHT_SOURCE")]
        source: Option<String>,

        /// Where a downloaded source is stored
        #[arg(long = "download-to")]
        download_to: Option<PathBuf>,

        /// CSV member to read when the source is a zip archive ("" = first .csv)
        #[arg(long = "csv-name", env = "POPWEIGHT_CSV_NAME")]
        csv_name: Option<String>,

        /// Where to write the normalized CSV
        #[arg(long = "normalized-output")]
        output: Option<PathBuf>,

        /// Skip TLS certificate verification when downloading
        #[arg(long = "insecure")]
        insecure: bool,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Merge the normalized CSV with GeoNames and REST Countries into the weighted table
    Merge {
        #[command(flatten)]
        inputs: InputArgs,

        /// Normalized population CSV
        #[arg(long = "population-csv")]
        population_csv: Option<PathBuf>,
    },

    /// Normalize and merge in one pass, without the intermediate CSV
    Build {
        #[command(flatten)]
        inputs: InputArgs,

        /// Raw population CSV (UN WPP or flat layout), optionally zipped
        #[arg(long = "source", env = "POPWEIGHT_SOURCE")]
        source: Option<PathBuf>,

        /// CSV member to read when the source is a zip archive ("" = first .csv)
        #[arg(long = "csv-name", env = "POPWEIGHT_CSV_NAME")]
        csv_name: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Validate an existing weighted table
    Check {
        /// Table to check (defaults to the configured output)
        path: Option<PathBuf>,
    },
}

#[cfg(feature = "fetch")]
#[derive(Debug, Subcommand)]
pub enum FetchSource {
    /// Raw population CSV
    Population(FetchArgs),
    /// GeoNames countryInfo.txt
    Geonames(FetchArgs),
    /// REST Countries metadata JSON
    Catalog(FetchArgs),
}

#[cfg(feature = "fetch")]
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Download URL (defaults to the canonical source)
    #[arg(long = "source-url")]
    pub source_url: Option<String>,

    /// Destination file (defaults to the configured path)
    #[arg(long = "output")]
    pub output: Option<PathBuf>,

    /// Skip TLS certificate verification (useful behind intercepting proxies)
    #[arg(long = "insecure")]
    pub insecure: bool,
}

/// Population filters; each overrides the config file when given.
#[derive(Debug, Args, Default)]
pub struct FilterArgs {
    /// Target year
    #[arg(long = "year", env = "POPWEIGHT_YEAR")]
    pub year: Option<i32>,

    /// Projection variant (e.g. Medium, Low, High)
    #[arg(long = "variant", env = "POPWEIGHT_VARIANT")]
    pub variant: Option<String>,

    /// Sex filter (e.g. "Both sexes")
    #[arg(long = "sex", env = "POPWEIGHT_SEX")]
    pub sex: Option<String>,

    /// Multiply population values by this factor (UN data ships thousands)
    #[arg(long = "value-scale", env = "POPWEIGHT_VALUE_SCALE")]
    pub value_scale: Option<f64>,
}

/// Gazetteer, catalog and output locations shared by merge and build.
#[derive(Debug, Args, Default)]
pub struct InputArgs {
    /// GeoNames countryInfo.txt
    #[arg(long = "geonames", env = "POPWEIGHT_GEONAMES")]
    pub geonames: Option<PathBuf>,

    /// REST Countries JSON
    #[arg(long = "rest-json", env = "POPWEIGHT_REST_JSON")]
    pub rest_json: Option<PathBuf>,

    /// Where to write the weighted table
    #[arg(short = 'o', long = "output", env = "POPWEIGHT_OUTPUT")]
    pub output: Option<PathBuf>,
}

impl FilterArgs {
    pub fn apply(self, opts: &mut NormalizeOptions) {
        if let Some(year) = self.year {
            opts.year = year;
        }
        if let Some(variant) = self.variant {
            opts.variant = variant;
        }
        if let Some(sex) = self.sex {
            opts.sex = sex;
        }
        if let Some(scale) = self.value_scale {
            opts.value_scale = scale;
        }
    }
}

impl InputArgs {
    pub fn apply(self, paths: &mut DataPaths) {
        if let Some(p) = self.geonames {
            paths.geonames = p;
        }
        if let Some(p) = self.rest_json {
            paths.catalog = p;
        }
        if let Some(p) = self.output {
            paths.output = p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn build_flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "popweight",
            "build",
            "--source",
            "wpp.csv",
            "--year",
            "2022",
            "--value-scale",
            "1000",
            "-o",
            "out.json",
        ])
        .unwrap();
        let Commands::Build {
            inputs,
            source,
            csv_name,
            filters,
        } = args.command
        else {
            panic!("expected build");
        };
        assert_eq!(source, Some(PathBuf::from("wpp.csv")));
        assert_eq!(csv_name, None);

        let mut opts = NormalizeOptions::default();
        filters.apply(&mut opts);
        assert_eq!(opts.year, 2022);
        assert_eq!(opts.value_scale, 1000.0);
        assert_eq!(opts.variant, "Medium");

        let mut paths = DataPaths::default();
        inputs.apply(&mut paths);
        assert_eq!(paths.output, PathBuf::from("out.json"));
        assert_eq!(paths.geonames, DataPaths::default().geonames);
    }

    #[test]
    fn normalize_accepts_an_archive_member() {
        let args = CliArgs::try_parse_from([
            "popweight",
            "normalize",
            "--source",
            "WPP2022_TotalPopulationBySex.zip",
            "--csv-name",
            "WPP2022_TotalPopulationBySex.csv",
        ])
        .unwrap();
        let Commands::Normalize { csv_name, .. } = args.command else {
            panic!("expected normalize");
        };
        assert_eq!(csv_name.as_deref(), Some("WPP2022_TotalPopulationBySex.csv"));
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let args =
            CliArgs::try_parse_from(["popweight", "check", "-v", "--config", "p.toml"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("p.toml")));
    }
}
