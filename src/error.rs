//! Error types for header generation and injection
//!
//! This module defines the error types used throughout the userscript-meta
//! library. All public functions return [`Result<T, Error>`] for consistent
//! error handling.

/// Errors that can occur while building or injecting a UserScript header
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Directive key is empty (or whitespace only)
    #[error("Invalid directive key '{key}': key cannot be empty")]
    InvalidKey { key: String },

    /// Directive value is absent or has an unsupported shape
    #[error("Invalid value for directive '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    /// No artifact in the bundle is flagged as the entry
    #[error("No entry file found")]
    EntryNotFound,

    /// Invalid glob pattern used to select the entry artifact
    #[error("Invalid glob pattern: {0}")]
    InvalidGlobPattern(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output directory could not be walked
    #[error("Failed to walk directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Malformed options file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
///
/// # Example
///
/// ```rust
/// use userscript_meta::{build_user_script_options, HeaderOptions, Result};
///
/// fn header_lines(options: &HeaderOptions) -> Result<usize> {
///     let block = build_user_script_options(options)?;
///     Ok(block.lines().count())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;
