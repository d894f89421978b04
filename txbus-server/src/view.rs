//! The search page's view state.
//!
//! One [`SearchView`] holds everything the page shows: the form fields, the
//! results of the last successful search and the selected sort key. It only
//! changes through the entry points here (field change, submit, sort change);
//! failures are logged and leave the state as it was.

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::booking::{Navigation, booking_link};
use crate::domain::{ItineraryRecord, SearchCriteria, SearchField, SearchQuery};
use crate::schedule::{ScheduleError, ScheduleSource};
use crate::sort::{SortKey, sort_itineraries};

/// What happened to a submitted search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Results were replaced with this many itineraries
    Replaced(usize),
    /// The form was incomplete; nothing was sent
    Incomplete,
    /// The request failed; previous results are kept
    Failed,
}

/// What a click on a result's booking control amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// Open the operator's booking page
    Open(Navigation),
    /// Nothing to do (unknown operator, or the link could not be built)
    Skipped,
    /// The index does not point at a displayed result
    NoSuchResult,
}

/// State container for the search page.
#[derive(Debug, Clone, Default)]
pub struct SearchView {
    criteria: SearchCriteria,
    results: Vec<ItineraryRecord>,
    sort: SortKey,
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    /// Results in the order the API returned them.
    pub fn results(&self) -> &[ItineraryRecord] {
        &self.results
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    /// Update one form field. Invalid input is logged and ignored.
    pub fn set_field(&mut self, field: SearchField, value: &str) -> bool {
        match self.criteria.set(field, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(?field, value, error = %e, "ignoring invalid form input");
                false
            }
        }
    }

    /// Apply a whole form submission.
    ///
    /// Every field is applied, so valid ones still update even when another
    /// is rejected. Returns `false` if any field was rejected; the caller must
    /// not search with the mix of old and new values that leaves behind.
    pub fn apply_form(&mut self, fields: &[(SearchField, &str)]) -> bool {
        let mut accepted = true;
        for &(field, value) in fields {
            accepted &= self.set_field(field, value);
        }
        accepted
    }

    /// Change the display order.
    pub fn set_sort(&mut self, key: SortKey) {
        debug!(%key, "sort changed");
        self.sort = key;
    }

    /// Results in display order.
    ///
    /// Recomputed on every call from the unsorted results and current key.
    pub fn displayed(&self) -> Vec<ItineraryRecord> {
        sort_itineraries(&self.results, self.sort)
    }

    /// The query a submit would send, if the form is complete.
    pub fn pending_query(&self) -> Option<SearchQuery> {
        match self.criteria.validate() {
            Ok(query) => Some(query),
            Err(e) => {
                warn!(error = %e, "search form incomplete, not submitting");
                None
            }
        }
    }

    /// Apply the response to a submitted search.
    ///
    /// Success replaces the results wholesale; failure is logged and the
    /// previous results stay on screen.
    pub fn apply_response(
        &mut self,
        response: Result<Vec<ItineraryRecord>, ScheduleError>,
    ) -> SubmitOutcome {
        match response {
            Ok(itineraries) => {
                let count = itineraries.len();
                self.results = itineraries;
                info!(count, "search results replaced");
                SubmitOutcome::Replaced(count)
            }
            Err(e) => {
                warn!(error = %e, "there was a problem fetching itineraries");
                SubmitOutcome::Failed
            }
        }
    }

    /// Resolve a booking click on the `index`th displayed result.
    ///
    /// The index counts into the list as displayed now, not as it was when the
    /// page was rendered. The view is shared, so a sort or search from another
    /// tab in between shifts which itinerary a stale link resolves to.
    pub fn book(&self, index: usize) -> BookingOutcome {
        let displayed = self.displayed();
        let Some(record) = displayed.get(index) else {
            return BookingOutcome::NoSuchResult;
        };

        match booking_link(record, self.criteria.passengers) {
            Ok(Some(nav)) => {
                info!(operator = %record.operator, url = %nav.url, "opening booking page");
                BookingOutcome::Open(nav)
            }
            Ok(None) => {
                debug!(operator = %record.operator, "no booking site for operator");
                BookingOutcome::Skipped
            }
            Err(e) => {
                warn!(operator = %record.operator, error = %e, "could not build booking link");
                BookingOutcome::Skipped
            }
        }
    }
}

/// Submit the current form contents.
///
/// The lock is only held to read the criteria and to apply the response,
/// never across the request itself. Concurrent submits race; whichever
/// response arrives last is what the page shows.
pub async fn submit<S: ScheduleSource>(view: &RwLock<SearchView>, source: &S) -> SubmitOutcome {
    let Some(query) = view.read().await.pending_query() else {
        return SubmitOutcome::Incomplete;
    };

    info!(
        date = %query.date,
        departure = %query.departure,
        arrival = %query.arrival,
        passengers = %query.passengers,
        "searching"
    );
    let response = source.fetch_itineraries(&query).await;

    view.write().await.apply_response(response)
}
