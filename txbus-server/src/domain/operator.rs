//! Bus operator type.

use std::fmt;

/// A bus operator, as named by the schedule API.
///
/// Known operators decide which external booking site an itinerary links to.
/// Names that match none of them are kept verbatim in [`Operator::Unknown`].
///
/// # Examples
///
/// ```
/// use txbus_server::domain::Operator;
///
/// assert_eq!(Operator::parse("Megabus"), Operator::Megabus);
/// assert_eq!(Operator::parse("VALLEY TRANSIT"), Operator::ValleyTransit);
///
/// // Anything else is unknown, not an error
/// assert_eq!(
///     Operator::parse("Unknown Co"),
///     Operator::Unknown("Unknown Co".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    RedCoach,
    Megabus,
    FlixBus,
    Greyhound,
    ValleyTransit,
    Unknown(String),
}

impl Operator {
    /// Parse an operator name.
    ///
    /// Matching is case-insensitive and exact apart from surrounding
    /// whitespace. This never fails.
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        match trimmed.to_lowercase().as_str() {
            "redcoach" => Operator::RedCoach,
            "megabus" => Operator::Megabus,
            "flixbus" => Operator::FlixBus,
            "greyhound" => Operator::Greyhound,
            "valley transit" => Operator::ValleyTransit,
            _ => Operator::Unknown(trimmed.to_string()),
        }
    }

    /// Whether this operator has a booking site we can link to.
    pub fn is_known(&self) -> bool {
        !matches!(self, Operator::Unknown(_))
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Operator::RedCoach => "RedCoach",
            Operator::Megabus => "Megabus",
            Operator::FlixBus => "FlixBus",
            Operator::Greyhound => "Greyhound",
            Operator::ValleyTransit => "Valley Transit",
            Operator::Unknown(name) => name,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
