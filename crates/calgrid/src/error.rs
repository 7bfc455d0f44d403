//! Error types for calgrid operations.

use thiserror::Error;

/// Errors that can occur while configuring a calendar, adding events or
/// resolving date inputs.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// A date or time input could not be parsed.
    #[error("Invalid date '{input}': {reason}")]
    DateParse { input: String, reason: String },

    /// A bulk-added event was missing one of its required fields.
    /// `index` is the 0-based position of the entry in the batch.
    #[error("Event at index {index} is missing required field '{field}'")]
    MissingField { field: &'static str, index: usize },

    /// A weekday directive that does not name a weekday.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A configuration value outside its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An event list could not be read as JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Convenience alias used throughout calgrid.
pub type Result<T> = std::result::Result<T, CalendarError>;
