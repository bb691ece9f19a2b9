use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("invalid collection config {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
    #[error("text extraction failed for {path:?}: {reason}")]
    Extraction { path: PathBuf, reason: String },
    #[error("embedding capability error: {0}")]
    Embedding(String),
    #[error("invalid chunker config: {0}")]
    InvalidChunkerConfig(&'static str),
    #[error("other: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MinerError>;

impl From<anyhow::Error> for MinerError {
    fn from(value: anyhow::Error) -> Self {
        Self::Other(value.to_string())
    }
}
