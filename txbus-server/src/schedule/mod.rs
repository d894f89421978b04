//! Bus schedule API client.
//!
//! The schedule API aggregates offers from several operators and returns
//! them as a flat JSON array of itineraries. Two request shapes exist:
//! - `GET /fetchBusData` with the search as query parameters
//! - `POST /submitForm` with the search as a JSON body
//!
//! A file-backed mock serves canned itineraries for development without
//! the API.

mod client;
mod error;
mod mock;

use std::future::Future;

pub use client::{DEFAULT_BASE_URL, ScheduleClient, ScheduleConfig, SubmitMode};
pub use error::ScheduleError;
pub use mock::MockScheduleClient;

use crate::domain::{ItineraryRecord, SearchQuery};

/// Something that can answer a search with itineraries.
pub trait ScheduleSource {
    fn fetch_itineraries(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<ItineraryRecord>, ScheduleError>> + Send;
}

/// The schedule source chosen at startup.
#[derive(Debug, Clone)]
pub enum ScheduleBackend {
    Http(ScheduleClient),
    Mock(MockScheduleClient),
}

impl ScheduleSource for ScheduleBackend {
    async fn fetch_itineraries(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<ItineraryRecord>, ScheduleError> {
        match self {
            ScheduleBackend::Http(client) => client.fetch_itineraries(query).await,
            ScheduleBackend::Mock(mock) => mock.fetch_itineraries(query).await,
        }
    }
}
