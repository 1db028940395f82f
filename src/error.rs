use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a recipe filtering run
///
/// Per-record problems (unparsable durations, missing ingredients) never show
/// up here; they are absorbed by the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Failed to read the input file
    #[error("Failed to read recipes from {path}: {source}")]
    Ingest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input line or array element is not a recipe object
    #[error("Malformed recipe record at {location}: {reason}")]
    MalformedRecord { location: String, reason: String },

    /// Failed to write the output file
    #[error("Failed to write {path}: {source}")]
    Egest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode a CSV row
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Ingredient pattern does not compile
    #[error("Invalid ingredient pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Worker pool could not be started
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
