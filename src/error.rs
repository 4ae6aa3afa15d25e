//! Application-wide error types.
//!
//! Library modules return [`Error`] through the [`Result`] alias, while the
//! binary entry point uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level error enum covering retrieval, discovery, matching
//!   and tagging failures
//! - [`SourceError`]: Detailed failures of a remote metadata source
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use album_tagger::error::{Error, Result};
//!
//! fn seconds(track: &TrackMetadata) -> Result<u32> {
//!     track.duration_seconds() // DurationParse errors propagate
//! }
//! ```

use std::path::PathBuf;

pub use crate::source::SourceError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote metadata retrieval failed
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] SourceError),

    /// No registered source claims the resource's domain
    #[error("Cannot process resource {0}: no handler for its domain")]
    NoHandler(String),

    /// The resource locator could not be parsed
    #[error("Invalid resource URI: {0}")]
    InvalidResource(String),

    /// Target file or directory does not exist
    #[error("No such file or directory: {0}")]
    PathNotFound(PathBuf),

    /// Duration string is not well-formed "MM:SS"
    #[error("Malformed duration {0:?}, expected MM:SS")]
    DurationParse(String),

    /// Album declares a track total that disagrees with its tracklist
    #[error("Album declares {declared} tracks but lists {listed}")]
    TrackCountMismatch { declared: u32, listed: usize },

    /// Number of tracks differs from the number of candidate files
    #[error("Cannot pair {tracks} tracks with {candidates} files")]
    CountMismatch { tracks: usize, candidates: usize },

    /// The assignment loop ran out of passes with tracks still unconfirmed
    #[error("Gave up after {passes} passes with {unassigned} tracks unassigned")]
    AssignmentExhausted { passes: u32, unassigned: usize },

    /// The operator cancelled the assignment
    #[error("Cancelled by operator")]
    Cancelled,

    /// Metadata reading/writing error
    #[error("Metadata error for {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    /// File rename error
    #[error("Rename error for {path}: {message}")]
    Rename { path: PathBuf, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a metadata error.
    pub fn metadata(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a rename error.
    pub fn rename(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Rename {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a path-not-found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound(path.into())
    }

    /// Create a duration parse error.
    pub fn duration(raw: impl Into<String>) -> Self {
        Self::DurationParse(raw.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("/path/to/album");
        assert!(err.to_string().contains("/path/to/album"));
    }

    #[test]
    fn test_duration_error_quotes_input() {
        let err = Error::duration("345");
        assert!(err.to_string().contains("\"345\""));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::Cancelled.context("while matching tracks");
        let msg = err.to_string();
        assert!(msg.contains("while matching tracks"));
        assert!(msg.contains("Cancelled"));
    }

    #[test]
    fn test_metadata_error() {
        let err = Error::metadata("/music/song.mp3", "unsupported format");
        let msg = err.to_string();
        assert!(msg.contains("song.mp3"));
        assert!(msg.contains("unsupported format"));
    }

    #[test]
    fn test_source_error_converts() {
        let err: Error = SourceError::RateLimited.into();
        assert!(matches!(err, Error::Retrieval(SourceError::RateLimited)));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::config("bad"));
        let with_ctx = result.with_context("additional context");
        assert!(with_ctx.unwrap_err().to_string().contains("additional context"));
    }

    #[test]
    fn test_io_result_with_context() {
        let result = std::fs::rename("/nonexistent/a.mp3", "/nonexistent/b.mp3")
            .with_context("Failed to stage rename of /nonexistent/a.mp3");
        let err = result.unwrap_err();
        assert!(matches!(&err, Error::WithContext { source, .. } if matches!(**source, Error::Io(_))));
        assert!(err.to_string().starts_with("Failed to stage rename"));
    }
}
