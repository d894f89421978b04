//! Domain types for the bus search.
//!
//! Itineraries come from the schedule API and are kept as received;
//! search criteria are validated here before a query is sent.

mod criteria;
mod date;
mod error;
mod itinerary;
mod operator;

pub use criteria::{CITIES, PassengerCount, SearchCriteria, SearchField, SearchQuery};
pub use date::{InvalidDate, parse_travel_date};
pub use error::CriteriaError;
pub use itinerary::ItineraryRecord;
pub use operator::Operator;

#[cfg(test)]
pub(crate) use itinerary::test_support;
