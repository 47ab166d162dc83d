use std::io;
use std::path::PathBuf;

// Errors raised by the GA engine itself
#[derive(Debug, thiserror::Error)]
pub enum GaError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

// Errors raised while turning external input into a problem or a config
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid 'capacity' field: expected a non-negative integer, found {0}")]
    InvalidCapacity(String),
    #[error(
        "invalid problem format ({0}); expected {{\"capacity\": int (optional), \"items\": [{{\"weight\": int, \"value\": int}}, ...]}}"
    )]
    InvalidFormat(String),
    #[error("the problem has no capacity; pass --capacity or add 'capacity' to the JSON file")]
    MissingCapacity,
    #[error("capacity input cancelled")]
    Cancelled,
    #[error("prompt failed: {0}")]
    Prompt(#[source] io::Error),
}
