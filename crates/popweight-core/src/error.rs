// crates/popweight-core/src/error.rs
use thiserror::Error;

/// Everything that can abort a pipeline run.
///
/// Row-level problems (bad numbers, unknown schema, unresolved codes) are not
/// errors; they are counted in the run reports and skipped.
#[derive(Debug, Error)]
pub enum PopError {
    /// A required input file is missing or cannot be opened.
    #[error("Input not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Weights cannot be computed when no population was fed in.
    #[error("Total population is zero; no weights can be computed")]
    ZeroPopulation,

    #[cfg(feature = "compact")]
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[cfg(feature = "fetch")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, PopError>;
