//! Error types and handling for `wxquery`

use std::fmt;
use thiserror::Error;

/// Why fetching one of the input documents failed.
///
/// The display form is the reason line of the `FAILED` report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// The remote service answered with a status other than 200
    NotOk,
    /// The response body or file was not the expected JSON
    Format,
    /// The request never produced a response
    Network,
    /// The local file could not be opened
    Missing,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            FetchFailure::NotOk => "NOT 200",
            FetchFailure::Format => "FORMAT",
            FetchFailure::Network => "NETWORK",
            FetchFailure::Missing => "MISSING",
        };
        f.write_str(reason)
    }
}

/// Main error type for `wxquery`
#[derive(Error, Debug)]
pub enum WxQueryError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors that are not tied to a single document fetch
    #[error("API error: {message}")]
    Api { message: String },

    /// Malformed query input or precondition violations
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A field did not have the textual shape it should have
    #[error("Format error: {message}")]
    Format { message: String },

    /// A lookup produced no candidates
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A document was readable but missing or carrying unusable values
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// One of the three input documents could not be fetched
    #[error("Fetch failed ({reason}): {origin}")]
    Fetch {
        /// `<status> <url>` for remote sources, the absolute path for files
        origin: String,
        reason: FetchFailure,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WxQueryError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new format error
    pub fn format<S: Into<String>>(message: S) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new invalid-data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(origin: S, reason: FetchFailure) -> Self {
        Self::Fetch {
            origin: origin.into(),
            reason,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WxQueryError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            WxQueryError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            WxQueryError::Validation { message } => format!("Invalid input: {message}"),
            WxQueryError::Format { message } | WxQueryError::InvalidData { message } => {
                format!("Unexpected data: {message}")
            }
            WxQueryError::NotFound { message } => format!("Nothing found: {message}"),
            WxQueryError::Fetch { origin, reason } => format!("FAILED\n{origin}\n{reason}"),
            WxQueryError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
