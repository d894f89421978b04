//! Search criteria entered through the form.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use super::date::parse_travel_date;
use super::error::CriteriaError;

/// Cities offered in the search form.
pub const CITIES: &[&str] = &[
    "Dallas, TX",
    "Austin, TX",
    "Houston, TX",
    "College Station, TX",
    "San Antonio, TX",
];

/// Number of travelling passengers. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PassengerCount(u32);

impl PassengerCount {
    /// Create a passenger count, rejecting zero.
    pub fn new(n: u32) -> Result<Self, CriteriaError> {
        if n == 0 {
            return Err(CriteriaError::InvalidPassengers("0".to_string()));
        }
        Ok(Self(n))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PassengerCount {
    fn default() -> Self {
        Self(1)
    }
}

impl FromStr for PassengerCount {
    type Err = CriteriaError;

    /// Parse form input. An empty field means the default of one passenger.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        match s.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Self(n)),
            _ => Err(CriteriaError::InvalidPassengers(s.to_string())),
        }
    }
}

impl fmt::Display for PassengerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A form field that can be edited independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Date,
    Departure,
    Arrival,
    Passengers,
}

/// Current contents of the search form.
///
/// Fields may be incomplete while the user is editing; [`SearchCriteria::validate`]
/// produces the checked query that is actually sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    pub date: Option<NaiveDate>,
    pub departure: String,
    pub arrival: String,
    pub passengers: PassengerCount,
}

/// A complete, validated search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub date: NaiveDate,
    pub departure: String,
    pub arrival: String,
    pub passengers: PassengerCount,
}

impl SearchCriteria {
    /// Update one field from raw form input.
    ///
    /// On error the field keeps its previous value.
    pub fn set(&mut self, field: SearchField, value: &str) -> Result<(), CriteriaError> {
        match field {
            SearchField::Date => {
                let value = value.trim();
                self.date = if value.is_empty() {
                    None
                } else {
                    Some(parse_travel_date(value)?)
                };
            }
            SearchField::Departure => self.departure = value.trim().to_string(),
            SearchField::Arrival => self.arrival = value.trim().to_string(),
            SearchField::Passengers => self.passengers = value.parse()?,
        }
        Ok(())
    }

    /// Check the criteria are complete enough to search.
    pub fn validate(&self) -> Result<SearchQuery, CriteriaError> {
        let date = self.date.ok_or(CriteriaError::Missing("date"))?;
        if self.departure.is_empty() {
            return Err(CriteriaError::Missing("departure city"));
        }
        if self.arrival.is_empty() {
            return Err(CriteriaError::Missing("arrival city"));
        }
        if self.departure == self.arrival {
            return Err(CriteriaError::SameCity(self.departure.clone()));
        }
        Ok(SearchQuery {
            date,
            departure: self.departure.clone(),
            arrival: self.arrival.clone(),
            passengers: self.passengers,
        })
    }

    /// Date as the form's `<input type="date">` expects it.
    pub fn date_input_value(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}
