/*!
 * Error types for the docalign application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a segmenter
#[derive(Error, Debug)]
pub enum SegmentError {
    /// A noise pattern from the configuration does not compile
    #[error("Invalid noise pattern '{pattern}': {source}")]
    InvalidNoisePattern {
        /// The offending pattern text
        pattern: String,
        /// Compilation error from the regex engine
        #[source]
        source: regex::Error,
    },
}

/// Errors that can occur while writing a DOCX package
#[derive(Error, Debug)]
pub enum RenderError {
    /// Error creating or writing the output file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error assembling the ZIP container
    #[error("Failed to assemble document package: {0}")]
    Package(#[from] zip::result::ZipError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The input path does not exist
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input exists but cannot be interpreted
    #[error("Invalid input format: {0}")]
    MalformedInput(String),

    /// The output could not be written
    #[error("Failed to write {}: {message}", path.display())]
    WriteFailure {
        /// Destination that could not be written
        path: PathBuf,
        /// Underlying failure
        message: String,
    },

    /// The configuration is unreadable or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from segmenter construction
    #[error("Segmenter error: {0}")]
    Segment(#[from] SegmentError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Build a write failure for the given destination
    pub fn write_failure<P: Into<PathBuf>>(path: P, error: impl std::fmt::Display) -> Self {
        Self::WriteFailure {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
