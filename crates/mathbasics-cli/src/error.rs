use mathbasics::{LoaderError, MathError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the application shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Startup could not make the library available.
    #[error("failed to load library: {0}")]
    Bootstrap(#[source] LoaderError),

    /// An event arrived for a library that is not loaded.
    #[error("library not available: {0}")]
    NotReady(#[source] LoaderError),

    #[error("invalid configuration {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error(transparent)]
    Math(#[from] MathError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
