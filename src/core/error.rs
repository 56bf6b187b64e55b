use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// Spreadsheet-facing functions in [`crate::functions`] never return this type; they fold
/// it into a display string. The typed API on [`crate::MxClient`] and [`crate::Session`]
/// surfaces it unchanged.
#[derive(Debug, Error)]
pub enum MxError {
    /// The request could not be completed at all (connection, DNS, timeout, abort).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The response body was not valid JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned an unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The server refused the request and explained why.
    #[error("Rejected ({status}): {message}")]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The `message` field from the error body, or a generic fallback.
        message: String,
    },

    /// No session credential is available.
    #[error("login required")]
    LoginRequired,

    /// The credential store could not be read or written.
    #[error("Credential store error: {0}")]
    Store(String),

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),
}

impl MxError {
    /// The HTTP status code carried by this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
