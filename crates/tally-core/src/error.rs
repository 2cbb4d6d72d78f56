//! Error types for the tally-core library.
//!
//! Extraction itself never fails; these errors only come out of building
//! extractors and loading lexicon or configuration files.

use thiserror::Error;

/// Main error type for the tally library.
#[derive(Error, Debug)]
pub enum TallyError {
    /// The lexicon could not be validated or compiled.
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to lexicon validation and pattern compilation.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// A pattern built from lexicon entries failed to compile.
    #[error("invalid pattern for {what}: {source}")]
    InvalidPattern {
        what: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The month list must name exactly twelve months.
    #[error("expected 12 month names, found {0}")]
    MonthCount(usize),

    /// A category has a blank name.
    #[error("category at index {0} has an empty name")]
    EmptyCategoryName(usize),

    /// A category VAT rate is not a percentage.
    #[error("category '{category}' has invalid VAT rate {rate}")]
    InvalidVatRate { category: String, rate: f64 },

    /// A required marker list is empty.
    #[error("lexicon has no {0}")]
    EmptyMarkers(&'static str),
}

/// Result type for the tally library.
pub type Result<T> = std::result::Result<T, TallyError>;
