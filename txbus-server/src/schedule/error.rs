//! Schedule API error types.

/// Errors from fetching itineraries.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not a list of itineraries
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Mock data could not be loaded
    #[error("mock data error: {0}")]
    MockData(String),
}
