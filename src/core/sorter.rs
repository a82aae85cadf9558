use crate::domain::field::Field;
use crate::domain::model::{Itinerary, Leg, Timestamp};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Attribute used to order itineraries. `None` keeps the input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Departure,
    Arrival,
    Duration,
    #[default]
    None,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Price,
        SortKey::Departure,
        SortKey::Arrival,
        SortKey::Duration,
        SortKey::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Departure => "departure",
            SortKey::Arrival => "arrival",
            SortKey::Duration => "duration",
            SortKey::None => "none",
        }
    }

    /// Lenient parse: unknown keys fall back to `None` instead of failing.
    pub fn parse_lenient(raw: &str) -> SortKey {
        match raw.trim().to_ascii_lowercase().as_str() {
            "price" => SortKey::Price,
            "departure" => SortKey::Departure,
            "arrival" => SortKey::Arrival,
            "duration" => SortKey::Duration,
            "" | "none" => SortKey::None,
            other => {
                tracing::warn!("Unrecognized sort key '{}', keeping input order", other);
                SortKey::None
            }
        }
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::parse_lenient(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where itineraries without a usable sort value end up.
///
/// Missing operands compare equal to each other and strictly after (`Last`) or before
/// (`First`) every present operand, which keeps the comparison a total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPlacement {
    First,
    #[default]
    Last,
}

pub const DEFAULT_MISSING_PLACEMENT: MissingPlacement = MissingPlacement::Last;

impl MissingPlacement {
    fn compare<T>(self, a: Field<T>, b: Field<T>, cmp: impl FnOnce(&T, &T) -> Ordering) -> Ordering {
        match (a, b) {
            (Field::Present(a), Field::Present(b)) => cmp(&a, &b),
            (Field::Missing, Field::Missing) => Ordering::Equal,
            (Field::Missing, Field::Present(_)) => match self {
                MissingPlacement::First => Ordering::Less,
                MissingPlacement::Last => Ordering::Greater,
            },
            (Field::Present(_), Field::Missing) => match self {
                MissingPlacement::First => Ordering::Greater,
                MissingPlacement::Last => Ordering::Less,
            },
        }
    }
}

fn leg_value<T>(itinerary: &Itinerary, f: impl FnOnce(&Leg) -> Field<T>) -> Field<T> {
    itinerary.first_leg().and_then(f)
}

fn departure(itinerary: &Itinerary) -> Field<Timestamp> {
    leg_value(itinerary, |leg| leg.departure)
}

fn arrival(itinerary: &Itinerary) -> Field<Timestamp> {
    leg_value(itinerary, |leg| leg.arrival)
}

fn duration(itinerary: &Itinerary) -> Field<u32> {
    leg_value(itinerary, |leg| leg.duration_in_minutes)
}

/// Price only counts when the itinerary has a first leg, matching how every other key
/// treats leg-less itineraries.
fn price(itinerary: &Itinerary) -> Field<f64> {
    leg_value(itinerary, |_| itinerary.price_raw())
}

pub fn compare_itineraries(
    a: &Itinerary,
    b: &Itinerary,
    key: SortKey,
    placement: MissingPlacement,
) -> Ordering {
    match key {
        SortKey::Price => placement.compare(price(a), price(b), |x, y| x.total_cmp(y)),
        SortKey::Departure => placement.compare(departure(a), departure(b), Ord::cmp),
        SortKey::Arrival => placement.compare(arrival(a), arrival(b), Ord::cmp),
        SortKey::Duration => placement.compare(duration(a), duration(b), Ord::cmp),
        SortKey::None => Ordering::Equal,
    }
}

/// Returns the itineraries ordered by `key` without touching the input.
///
/// The sort is stable, so itineraries with equal keys keep their input order. An absent
/// collection sorts to an empty one.
pub fn sort_itineraries(
    itineraries: Option<&[Itinerary]>,
    key: SortKey,
    placement: MissingPlacement,
) -> Vec<&Itinerary> {
    let Some(itineraries) = itineraries else {
        tracing::debug!("No itinerary collection supplied, nothing to sort");
        return Vec::new();
    };

    let mut sorted: Vec<&Itinerary> = itineraries.iter().collect();
    if key != SortKey::None {
        sorted.sort_by(|a, b| compare_itineraries(a, b, key, placement));
    }

    tracing::debug!("Sorted {} itineraries by {}", sorted.len(), key);
    sorted
}
