//! Operator booking link generation.
//!
//! Each known operator has its own booking site and query schema. The
//! builder only produces a [`Navigation`]; opening it is left to the caller.

use reqwest::Url;

use crate::domain::{InvalidDate, ItineraryRecord, Operator, PassengerCount, parse_travel_date};

const REDCOACH_URL: &str = "https://booking.redcoachusa.com/journeys";
const MEGABUS_URL: &str = "https://us.megabus.com/journey-planner/journeys";
const FLIXBUS_URL: &str = "https://shop.flixbus.com/search";

/// Where a navigation should be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    /// A new browsing context (tab or window)
    NewContext,
}

impl NavigationTarget {
    /// Value for an HTML `target` attribute.
    pub fn html_target(&self) -> &'static str {
        match self {
            NavigationTarget::NewContext => "_blank",
        }
    }
}

/// A navigation the caller may choose to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub url: Url,
    pub target: NavigationTarget,
}

impl Navigation {
    fn new_context(url: Url) -> Self {
        Self {
            url,
            target: NavigationTarget::NewContext,
        }
    }
}

/// Errors building a booking link for a known operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// The itinerary carries no station ID for one end of the trip
    #[error("itinerary has no {0} station ID")]
    MissingStationId(&'static str),

    /// The operator needs a reformatted date but the itinerary's is unreadable
    #[error("cannot build {operator} link: {source}")]
    InvalidDate {
        operator: Operator,
        #[source]
        source: InvalidDate,
    },

    /// URL assembly failed
    #[error("invalid booking URL: {0}")]
    Url(String),
}

/// Build the booking link for an itinerary.
///
/// Returns `Ok(None)` when the operator has no known booking site; that is a
/// no-op, not an error.
///
/// # Example
///
/// ```
/// use txbus_server::booking::booking_link;
/// use txbus_server::domain::{ItineraryRecord, PassengerCount};
///
/// let record: ItineraryRecord = serde_json::from_value(serde_json::json!({
///     "operator": "Redcoach", "date": "2024-05-01", "price": 30.0,
///     "departureCity": "Dallas, TX", "departureStation": "Love Field",
///     "departureTime": "08:00 AM", "arrivalCity": "Austin, TX",
///     "arrivalStation": "Domain", "arrivalTime": "11:00 AM",
///     "departureCityID": "A", "arrivalCityID": "B"
/// })).unwrap();
///
/// let nav = booking_link(&record, PassengerCount::new(2).unwrap()).unwrap().unwrap();
/// assert!(nav.url.as_str().contains("oStop=A"));
/// ```
pub fn booking_link(
    record: &ItineraryRecord,
    passengers: PassengerCount,
) -> Result<Option<Navigation>, BookingError> {
    let operator = record.operator_kind();
    if !operator.is_known() {
        return Ok(None);
    }

    let origin = record
        .departure_city_id
        .as_deref()
        .ok_or(BookingError::MissingStationId("departure"))?;
    let destination = record
        .arrival_city_id
        .as_deref()
        .ok_or(BookingError::MissingStationId("arrival"))?;
    let passengers = passengers.to_string();

    let url = match &operator {
        Operator::RedCoach => build_url(
            REDCOACH_URL,
            &[
                ("oStop", origin),
                ("dStop", destination),
                ("oDate", record.date.as_str()),
                ("passengers", passengers.as_str()),
            ],
        )?,
        Operator::Megabus => {
            let date = reformat_date(&operator, &record.date, "%Y-%m-%d")?;
            build_url(
                MEGABUS_URL,
                &[
                    ("days", "1"),
                    ("concessionCount", "0"),
                    ("departureDate", date.as_str()),
                    ("destinationId", destination),
                    ("inboundOtherDisabilityCount", "0"),
                    ("inboundPcaCount", "0"),
                    ("inboundWheelchairSeated", "0"),
                    ("nusCount", "0"),
                    ("originId", origin),
                    ("otherDisabilityCount", "0"),
                    ("pcaCount", "0"),
                    ("totalPassengers", passengers.as_str()),
                    ("wheelchairSeated", "0"),
                ],
            )?
        }
        // Greyhound and Valley Transit tickets are sold through the FlixBus shop
        Operator::FlixBus | Operator::Greyhound | Operator::ValleyTransit => {
            let date = reformat_date(&operator, &record.date, "%d.%m.%Y")?;
            build_url(
                FLIXBUS_URL,
                &[
                    ("departureCity", origin),
                    ("arrivalCity", destination),
                    ("rideDate", date.as_str()),
                    ("adult", passengers.as_str()),
                    ("features[feature.enable_distribusion]", "1"),
                    ("features[feature.train_cities_only]", "0"),
                ],
            )?
        }
        Operator::Unknown(_) => return Ok(None),
    };

    Ok(Some(Navigation::new_context(url)))
}

fn build_url(base: &str, params: &[(&str, &str)]) -> Result<Url, BookingError> {
    Url::parse_with_params(base, params).map_err(|e| BookingError::Url(e.to_string()))
}

fn reformat_date(operator: &Operator, date: &str, format: &str) -> Result<String, BookingError> {
    let parsed = parse_travel_date(date).map_err(|source| BookingError::InvalidDate {
        operator: operator.clone(),
        source,
    })?;
    Ok(parsed.format(format).to_string())
}
