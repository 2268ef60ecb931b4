//! Errors surfaced by the runner.

use std::path::PathBuf;

use foresight_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("cannot write output: {0}")]
    Write(#[from] std::io::Error),
}
