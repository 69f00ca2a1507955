//! Error types shared by every check
//!
//! Checks never swallow faults: each variant here ends up as a `[FAIL]` line
//! in a suite report, or as a non-zero exit for snapshot commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by config, artifact, HTML and snapshot checks
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document in {} is null", .0.display())]
    NullDocument(PathBuf),

    #[error("Missing keys: {0:?}")]
    MissingKeys(Vec<String>),

    #[error("Round trip through {} changed the document", .0.display())]
    RoundTripMismatch(PathBuf),

    #[error("Missing: {0}")]
    MissingArtifact(String),

    #[error("Missing HTML element(s): {}", .0.join(", "))]
    MissingHtmlTokens(Vec<&'static str>),

    #[error("Syntax error in {}: {message}", path.display())]
    Syntax { path: PathBuf, message: String },

    #[error("Interpreter '{interpreter}' could not be started: {source}")]
    InterpreterUnavailable {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot name '{0}' (allowed: letters, digits, '_', '-', '.')")]
    InvalidSnapshotName(String),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Check panicked: {0}")]
    Panicked(String),
}

impl CheckError {
    /// Wrap an I/O error, mapping `NotFound` to its own variant
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            CheckError::NotFound(path)
        } else {
            CheckError::Io { path, source }
        }
    }
}

/// Result type for check operations
pub type Result<T> = std::result::Result<T, CheckError>;
