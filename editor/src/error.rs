//! Error types for the config editor
//!
//! All errors use thiserror for structured error handling.
//! Lenient recoveries (bad time fields, stale alarm slots) never reach
//! this type; they are handled where they occur.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config.json not found at {}", .0.display())]
    DocumentMissing(PathBuf),

    #[error("Failed to parse config.json: {0}")]
    ParseFailure(#[source] serde_json::Error),

    #[error("Failed to serialize JSON: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Invalid config document: {0}")]
    InvalidDocument(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Alarm not found: {0}")]
    AlarmNotFound(usize),

    #[error("Note not found: {0}")]
    NoteNotFound(usize),

    #[error("No alarm edit in progress")]
    NotEditing,

    #[error("Failed to write {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// True for rejected user input, as opposed to document or I/O failures
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
