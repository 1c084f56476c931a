use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] lumen_core::Error),

    #[error("config {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("processing worker failed: {0}")]
    Worker(String),

    #[error("editor session needs a tokio runtime: {0}")]
    NoRuntime(String),
}
