//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{ItineraryRecord, SearchCriteria};
use crate::sort::SortKey;

/// Search form submission.
///
/// Every field is raw text; missing fields are treated as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    /// Travel date, `YYYY-MM-DD`
    pub date: String,

    /// Departure city
    pub departure: String,

    /// Arrival city
    pub arrival: String,

    /// Passenger count; empty means one
    pub passengers: String,
}

/// Sort selector submission.
#[derive(Debug, Deserialize)]
pub struct SortForm {
    /// Sort key form value
    pub key: String,
}

/// Current page state as JSON.
#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    /// Form contents
    pub criteria: SearchCriteria,

    /// Selected sort key
    pub sort: SortKey,

    /// Results in display order
    pub results: Vec<ItineraryRecord>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
