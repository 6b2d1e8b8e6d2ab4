use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read canvas config at {path}: {source}")]
    Io {
	path: PathBuf,
	#[source]
	source: std::io::Error,
    },

    #[error("failed to parse canvas config at {path}: {source}")]
    Parse {
	path: PathBuf,
	#[source]
	source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
	path: PathBuf,
	#[source]
	source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    ReadFile {
	path: PathBuf,
	#[source]
	source: std::io::Error,
    },

    #[error("failed to read svg document: {0}")]
    Read(#[source] std::io::Error),

    #[error("malformed svg document: {0}")]
    Malformed(String),

    #[error("invalid viewBox '{0}'")]
    ViewBox(String),

    #[error("failed to encode note record: {0}")]
    Encode(#[from] serde_json::Error),
}
