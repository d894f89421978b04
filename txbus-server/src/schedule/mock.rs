//! Mock schedule client for development without the schedule API.
//!
//! Loads itineraries from a JSON file (same shape as the API response) and
//! serves the ones matching the searched city pair.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{ItineraryRecord, SearchQuery};

use super::ScheduleSource;
use super::error::ScheduleError;

/// Mock schedule client that serves data from a JSON file.
#[derive(Debug, Clone)]
pub struct MockScheduleClient {
    itineraries: Arc<Vec<ItineraryRecord>>,
}

impl MockScheduleClient {
    /// Load itineraries from a JSON array file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ScheduleError::MockData(format!("failed to read {}: {e}", path.display()))
        })?;

        let itineraries: Vec<ItineraryRecord> = serde_json::from_str(&json).map_err(|e| {
            ScheduleError::MockData(format!("failed to parse {}: {e}", path.display()))
        })?;

        tracing::info!(count = itineraries.len(), path = %path.display(), "loaded mock itineraries");
        Ok(Self::new(itineraries))
    }

    /// Serve a fixed list of itineraries.
    pub fn new(itineraries: Vec<ItineraryRecord>) -> Self {
        Self {
            itineraries: Arc::new(itineraries),
        }
    }

    pub fn len(&self) -> usize {
        self.itineraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itineraries.is_empty()
    }

    /// Itineraries for the searched city pair.
    ///
    /// Dates and passenger counts are ignored; mock data is static.
    pub async fn fetch_itineraries(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<ItineraryRecord>, ScheduleError> {
        Ok(self
            .itineraries
            .iter()
            .filter(|r| {
                r.departure_city.eq_ignore_ascii_case(&query.departure)
                    && r.arrival_city.eq_ignore_ascii_case(&query.arrival)
            })
            .cloned()
            .collect())
    }
}

impl ScheduleSource for MockScheduleClient {
    async fn fetch_itineraries(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<ItineraryRecord>, ScheduleError> {
        MockScheduleClient::fetch_itineraries(self, query).await
    }
}
