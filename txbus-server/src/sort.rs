//! Sorting of search results.
//!
//! Results are sorted on every render rather than cached; the input list is
//! never reordered in place.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::ItineraryRecord;

/// User-selected display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Order as returned by the API
    #[default]
    None,
    /// By operator name, A to Z
    Alphabetical,
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
}

/// Error returned when parsing an unknown sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0:?}")]
pub struct InvalidSortKey(String);

impl SortKey {
    /// All keys, in the order the selector shows them.
    pub const ALL: [SortKey; 4] = [
        SortKey::None,
        SortKey::Alphabetical,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
    ];

    /// Form value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Alphabetical => "alphabetical",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
        }
    }

    /// Human-readable label for the selector.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::None => "Default",
            SortKey::Alphabetical => "Operator (A-Z)",
            SortKey::PriceAsc => "Price: low to high",
            SortKey::PriceDesc => "Price: high to low",
        }
    }
}

impl FromStr for SortKey {
    type Err = InvalidSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| InvalidSortKey(s.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare two strings case-insensitively, lowercase first on ties.
///
/// Characters are lowercased and compared by code point; only strings that
/// are equal ignoring case are ordered by case, lowercase first. This agrees
/// with English collation for plain ASCII names but not for accented letters
/// or punctuation (`é` sorts after `z`).
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        a.chars()
            .map(char::is_uppercase)
            .cmp(b.chars().map(char::is_uppercase))
    })
}

/// Return a sorted copy of `records`.
///
/// The sort is stable: records that compare equal under `key` keep their
/// original relative order. `SortKey::None` returns the records unchanged.
pub fn sort_itineraries(records: &[ItineraryRecord], key: SortKey) -> Vec<ItineraryRecord> {
    let mut sorted = records.to_vec();

    match key {
        SortKey::None => {}
        SortKey::Alphabetical => sorted.sort_by(|a, b| locale_cmp(&a.operator, &b.operator)),
        SortKey::PriceAsc => sorted.sort_by(|a, b| a.price.total_cmp(&b.price)),
        // Reversed comparator rather than reversed output, so ties stay stable
        SortKey::PriceDesc => sorted.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }

    sorted
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::test_support::record;
    use proptest::prelude::*;

    /// Records tagged with their input position in `departure_time`, with
    /// small value ranges so ties are common.
    fn records() -> impl Strategy<Value = Vec<ItineraryRecord>> {
        let operator = prop::sample::select(vec![
            "Megabus", "megabus", "FlixBus", "Greyhound", "Redcoach", "Valley Transit", "Acme",
        ]);
        let price = (0u32..12).prop_map(|cents| f64::from(cents) * 2.5);

        prop::collection::vec((operator, price), 0..24).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (op, price))| {
                    let mut r = record(op, price);
                    r.departure_time = i.to_string();
                    r
                })
                .collect()
        })
    }

    fn position(r: &ItineraryRecord) -> usize {
        r.departure_time.parse().unwrap()
    }

    fn is_permutation(a: &[ItineraryRecord], b: &[ItineraryRecord]) -> bool {
        let mut x: Vec<usize> = a.iter().map(position).collect();
        let mut y: Vec<usize> = b.iter().map(position).collect();
        x.sort_unstable();
        y.sort_unstable();
        x == y
    }

    proptest! {
        #[test]
        fn price_asc_is_sorted_permutation(input in records()) {
            let sorted = sort_itineraries(&input, SortKey::PriceAsc);
            prop_assert!(is_permutation(&input, &sorted));
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].price <= pair[1].price);
                if pair[0].price == pair[1].price {
                    prop_assert!(position(&pair[0]) < position(&pair[1]));
                }
            }
        }

        #[test]
        fn price_desc_is_sorted_permutation(input in records()) {
            let sorted = sort_itineraries(&input, SortKey::PriceDesc);
            prop_assert!(is_permutation(&input, &sorted));
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].price >= pair[1].price);
                if pair[0].price == pair[1].price {
                    prop_assert!(position(&pair[0]) < position(&pair[1]));
                }
            }
        }

        #[test]
        fn alphabetical_is_sorted_and_stable(input in records()) {
            let sorted = sort_itineraries(&input, SortKey::Alphabetical);
            prop_assert!(is_permutation(&input, &sorted));
            for pair in sorted.windows(2) {
                let ord = locale_cmp(&pair[0].operator, &pair[1].operator);
                prop_assert_ne!(ord, Ordering::Greater);
                if ord == Ordering::Equal {
                    prop_assert!(position(&pair[0]) < position(&pair[1]));
                }
            }
        }

        #[test]
        fn sorting_is_idempotent(input in records(), key in prop::sample::select(SortKey::ALL.to_vec())) {
            let once = sort_itineraries(&input, key);
            let twice = sort_itineraries(&once, key);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn input_is_never_mutated(input in records(), key in prop::sample::select(SortKey::ALL.to_vec())) {
            let before = input.clone();
            let _ = sort_itineraries(&input, key);
            prop_assert_eq!(input, before);
        }
    }
}
