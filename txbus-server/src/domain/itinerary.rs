//! Itinerary records returned by the schedule API.

use serde::{Deserialize, Deserializer, Serialize};

use super::operator::Operator;

/// One bus trip offer.
///
/// Field names follow the schedule API's camelCase JSON. Records are
/// immutable once received and are replaced wholesale on the next search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRecord {
    pub departure_city: String,
    pub departure_station: String,
    pub departure_time: String,

    pub arrival_city: String,
    pub arrival_station: String,
    pub arrival_time: String,

    /// Travel date as sent by the API (usually `MM-DD-YYYY`).
    pub date: String,

    /// Operator name as sent by the API.
    pub operator: String,

    /// Fare in USD. Never negative.
    #[serde(deserialize_with = "non_negative_price")]
    pub price: f64,

    /// Opaque operator-side ID of the departure stop. Older API revisions
    /// omit it; such records cannot be booked.
    #[serde(
        rename = "departureCityID",
        default,
        deserialize_with = "opaque_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub departure_city_id: Option<String>,

    /// Opaque operator-side ID of the arrival stop.
    #[serde(
        rename = "arrivalCityID",
        default,
        deserialize_with = "opaque_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub arrival_city_id: Option<String>,
}

impl ItineraryRecord {
    /// The operator as a tagged variant.
    pub fn operator_kind(&self) -> Operator {
        Operator::parse(&self.operator)
    }

    /// Price formatted for display, e.g. `$19.99`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// Accepts IDs sent either as JSON strings or JSON numbers.
///
/// Megabus uses integer IDs, FlixBus uses UUID strings.
fn opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.and_then(|id| match id {
        RawId::Text(s) if s.trim().is_empty() => None,
        RawId::Text(s) => Some(s),
        RawId::Number(n) => Some(n.to_string()),
    }))
}

fn non_negative_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = f64::deserialize(deserializer)?;
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(serde::de::Error::custom(format!(
            "price must be a non-negative number, got {price}"
        )))
    }
}
