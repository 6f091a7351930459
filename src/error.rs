//! Error types for linkviz operations.
//!
//! Only the ambient edges of the crate are fallible (loading, configuration, surface allocation,
//! encoding). Engine renders and brush handling never fail: anomalies degrade to an empty view.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in linkviz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Structural CSV error while reading a dataset.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a rendering surface.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A scatter field name outside the fixed field list.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A heatmap dimension name outside the fixed dimension list.
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    /// Configuration file missing or unreadable.
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    /// Configuration file is not valid YAML for [`crate::config::Config`].
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// Line of the offending YAML (0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },
}
