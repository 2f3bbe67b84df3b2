/*!
 * Error types for the qris application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions. The parser core never
 * produces errors: content anomalies end up in the discard list instead.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning an input file into raw lines
#[derive(Error, Debug)]
pub enum LineSourceError {
    /// The file could not be opened or read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Offending file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file extension is neither `.txt` nor `.docx`
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(PathBuf),

    /// The `.docx` zip container is damaged
    #[error("Invalid document archive: {0}")]
    Archive(String),

    /// The `.docx` container has no `word/document.xml` part
    #[error("Document part missing from archive: {0}")]
    MissingDocumentPart(String),

    /// The document XML could not be read
    #[error("Malformed document XML: {0}")]
    Xml(String),
}

impl From<zip::result::ZipError> for LineSourceError {
    fn from(error: zip::result::ZipError) -> Self {
        Self::Archive(error.to_string())
    }
}

impl From<quick_xml::Error> for LineSourceError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Xml(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration file or its values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error while reading an input document
    #[error("Source error: {0}")]
    Source(#[from] LineSourceError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
