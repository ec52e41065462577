use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the I/O collaborators around the anchor locator
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot extract ebook ID from source_url: {source_url}")]
    MissingEbookId { source_url: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File is not valid UTF-8: {path}")]
    InvalidUtf8 { path: PathBuf },

    #[error("Failed to (de)serialize metadata JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not find '{file_name}' in the current or parent directories")]
    EnvFileNotFound { file_name: String },

    #[error("{key} not found in environment file {path}")]
    MissingKey { key: String, path: PathBuf },

    #[error("Failed to read environment file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
