use thiserror::Error;

use crate::quotes::QuoteError;
use crate::store::StoreError;

/// Startup errors. Any of these terminates the process before the first cycle.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Errors that abort the remainder of a single cycle.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] QuoteError),

    #[error("persist failed: {0}")]
    Persist(#[from] StoreError),
}

