//! Domain error types.
//!
//! These errors represent invalid form input. They are distinct from
//! API/IO errors and never reach the user as an error page.

use super::date::InvalidDate;

/// Errors from editing or validating search criteria.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    /// Passenger count is not a positive integer
    #[error("invalid passenger count: {0:?}")]
    InvalidPassengers(String),

    /// Date field could not be parsed
    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),

    /// A required field is empty
    #[error("missing {0}")]
    Missing(&'static str),

    /// Departure and arrival are the same city
    #[error("departure and arrival are both {0}")]
    SameCity(String),
}
