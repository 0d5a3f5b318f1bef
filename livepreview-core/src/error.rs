use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("invalid transcript: {0}")]
    InvalidTranscript(String),

    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("file is not valid UTF-8: {path}")]
    NonUtf8File { path: PathBuf },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path} at line {line}: {source}")]
    InvalidJson {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, PreviewError>;
