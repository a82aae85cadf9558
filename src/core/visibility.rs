use crate::utils::error::{FlightError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attribute group of a leg that the listing can show or hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Airline,
    Departure,
    Arrival,
    Duration,
    Stops,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Airline,
        Column::Departure,
        Column::Arrival,
        Column::Duration,
        Column::Stops,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Airline => "airline",
            Column::Departure => "departure",
            Column::Arrival => "arrival",
            Column::Duration => "duration",
            Column::Stops => "stops",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::Airline => "Airline",
            Column::Departure => "Departure",
            Column::Arrival => "Arrival",
            Column::Duration => "Duration",
            Column::Stops => "Stops",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Column {
    type Err = FlightError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Column::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| {
                FlightError::invalid_argument(
                    "column",
                    s,
                    "expected one of airline, departure, arrival, duration, stops",
                )
            })
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Show/hide flag per column. All columns start visible.
///
/// The map is a small `Copy` value: [`VisibilityMap::toggle`] hands back a new map and
/// leaves the receiver as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityMap {
    flags: [bool; 5],
}

impl Default for VisibilityMap {
    fn default() -> Self {
        Self { flags: [true; 5] }
    }
}

impl VisibilityMap {
    pub fn all_visible() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, column: Column) -> bool {
        self.flags[column.index()]
    }

    #[must_use]
    pub fn toggle(self, column: Column) -> Self {
        let visible = self.is_visible(column);
        self.with(column, !visible)
    }

    #[must_use]
    pub fn with(mut self, column: Column, visible: bool) -> Self {
        self.flags[column.index()] = visible;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Column, bool)> + '_ {
        Column::ALL.into_iter().map(move |c| (c, self.is_visible(c)))
    }

    pub fn visible_columns(&self) -> Vec<Column> {
        self.iter()
            .filter_map(|(column, visible)| visible.then_some(column))
            .collect()
    }
}

impl Serialize for VisibilityMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(Column::ALL.len()))?;
        for (column, visible) in self.iter() {
            map.serialize_entry(column.name(), &visible)?;
        }
        map.end()
    }
}

/// Accepts a partial table; unlisted columns stay visible.
impl<'de> Deserialize<'de> for VisibilityMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = std::collections::BTreeMap::<Column, bool>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .fold(VisibilityMap::default(), |map, (column, visible)| {
                map.with(column, visible)
            }))
    }
}
