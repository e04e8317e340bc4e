/*!
 * Error types for the storyboard application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when querying the movie-metadata service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while reading the answerline database
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The CSV file could not be opened or a record could not be decoded
    #[error("Failed to read answerline database {path}: {source}")]
    Read {
        /// Path of the database file
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Explicit slide indices of a question do not form 1..=n
    #[error("Packet {packet}, question {number}: slide indices {found:?} are not contiguous from 1")]
    NonContiguousSlides {
        packet: String,
        number: u32,
        found: Vec<u32>,
    },

    /// Two rows of the same question claim the same slide index
    #[error("Packet {packet}, question {number}: slide {slide} appears more than once")]
    DuplicateSlide {
        packet: String,
        number: u32,
        slide: u32,
    },

    /// Some rows of a question carry a slide index and others do not
    #[error("Packet {packet}, question {number}: slide index is set on some rows but not all")]
    PartialSlideIndex {
        packet: String,
        number: u32,
    },
}

/// Errors raised by the rich-text document model and its file formats
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file extension does not map to a known document format
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// A paragraph handle that does not belong to this document
    #[error("Unknown paragraph handle: {0}")]
    UnknownParagraph(usize),

    /// A run handle that does not belong to this document
    #[error("Unknown run handle: paragraph {paragraph}, run {run}")]
    UnknownRun { paragraph: usize, run: usize },

    /// Underlying filesystem failure
    #[error("Document I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure
    #[error("Document JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
