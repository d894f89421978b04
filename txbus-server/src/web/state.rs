//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::schedule::ScheduleBackend;
use crate::view::SearchView;

/// Shared application state.
///
/// There is one search page, so there is one view: every client sees and
/// edits the same form and results.
#[derive(Clone)]
pub struct AppState {
    /// Where searches are sent
    pub schedule: Arc<ScheduleBackend>,

    /// The page's view state
    pub view: Arc<RwLock<SearchView>>,
}

impl AppState {
    /// Create a new app state with an empty search form.
    pub fn new(schedule: ScheduleBackend) -> Self {
        Self {
            schedule: Arc::new(schedule),
            view: Arc::new(RwLock::new(SearchView::new())),
        }
    }
}
