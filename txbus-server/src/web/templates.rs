//! Askama templates for the web frontend.

use askama::Template;

use crate::booking::NavigationTarget;
use crate::domain::{CITIES, ItineraryRecord};
use crate::sort::SortKey;
use crate::view::SearchView;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The search page: form, sort selector and results.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub date: String,
    pub passengers: u32,
    pub departure_options: Vec<SelectOption>,
    pub arrival_options: Vec<SelectOption>,
    pub sort_options: Vec<SelectOption>,
    pub results: Vec<ItineraryView>,
}

impl IndexTemplate {
    /// Snapshot the view state for rendering.
    pub fn from_view(view: &SearchView) -> Self {
        let criteria = view.criteria();
        let sort = view.sort_key();

        Self {
            date: criteria.date_input_value(),
            passengers: criteria.passengers.get(),
            departure_options: city_options(&criteria.departure),
            arrival_options: city_options(&criteria.arrival),
            sort_options: SortKey::ALL
                .iter()
                .map(|k| SelectOption {
                    value: k.as_str().to_string(),
                    label: k.label().to_string(),
                    selected: *k == sort,
                })
                .collect(),
            results: view
                .displayed()
                .iter()
                .enumerate()
                .map(|(i, r)| ItineraryView::from_record(i, r))
                .collect(),
        }
    }
}

fn city_options(selected: &str) -> Vec<SelectOption> {
    CITIES
        .iter()
        .map(|city| SelectOption {
            value: (*city).to_string(),
            label: (*city).to_string(),
            selected: *city == selected,
        })
        .collect()
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// An `<option>` in a `<select>`.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One result row.
#[derive(Debug, Clone)]
pub struct ItineraryView {
    /// Position in the displayed list; used for the booking link
    pub index: usize,
    pub date: String,
    pub departure_city: String,
    pub departure_station: String,
    pub departure_time: String,
    pub arrival_city: String,
    pub arrival_station: String,
    pub arrival_time: String,
    pub operator: String,
    pub price: String,
    /// `target` attribute for the booking control; empty when the operator
    /// has no booking site, so the no-op click stays on the page
    pub booking_target: &'static str,
}

impl ItineraryView {
    pub fn from_record(index: usize, record: &ItineraryRecord) -> Self {
        let booking_target = if record.operator_kind().is_known() {
            NavigationTarget::NewContext.html_target()
        } else {
            ""
        };

        Self {
            index,
            date: record.date.clone(),
            departure_city: record.departure_city.clone(),
            departure_station: record.departure_station.clone(),
            departure_time: record.departure_time.clone(),
            arrival_city: record.arrival_city.clone(),
            arrival_station: record.arrival_station.clone(),
            arrival_time: record.arrival_time.clone(),
            operator: record.operator.clone(),
            price: record.display_price(),
            booking_target,
        }
    }

    pub fn opens_new_context(&self) -> bool {
        !self.booking_target.is_empty()
    }
}
