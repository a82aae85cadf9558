use crate::domain::field::{
    deserialize_count, deserialize_field_list, deserialize_present_list, Field,
};
use crate::utils::error::Result;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Search response envelope. `itineraries` is `None` when the response carried no
/// collection at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightData {
    #[serde(default, deserialize_with = "deserialize_collection")]
    pub itineraries: Option<Vec<Itinerary>>,
}

impl FlightData {
    pub fn new(itineraries: Vec<Itinerary>) -> Self {
        Self {
            itineraries: Some(itineraries),
        }
    }

    /// Parses a search response, accepting either `{"itineraries": [...]}` or the
    /// API's `{"data": {"itineraries": [...]}}` envelope.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(content)?;
        if value.get("itineraries").is_none() {
            if let Some(data) = value.get_mut("data") {
                tracing::debug!("Unwrapping 'data' envelope");
                value = data.take();
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn itineraries(&self) -> Option<&[Itinerary]> {
        self.itineraries.as_deref()
    }

    pub fn len(&self) -> usize {
        self.itineraries.as_ref().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn deserialize_collection<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<Itinerary>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Array(items) => {
            let total = items.len();
            let itineraries: Vec<Itinerary> = items
                .into_iter()
                .filter_map(|item| Field::<Itinerary>::from_json_value(item).present())
                .collect();
            if itineraries.len() < total {
                tracing::warn!(
                    "Skipped {} itinerary entries that were not objects",
                    total - itineraries.len()
                );
            }
            Ok(Some(itineraries))
        }
        other => {
            tracing::warn!("'itineraries' is not an array ({}), treating as absent", other);
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Itinerary {
    pub id: Field<String>,
    pub price: Field<Price>,
    #[serde(deserialize_with = "deserialize_field_list")]
    pub legs: Vec<Field<Leg>>,
}

impl Itinerary {
    pub fn first_leg(&self) -> Field<&Leg> {
        self.legs
            .first()
            .map(Field::as_ref)
            .unwrap_or(Field::Missing)
    }

    pub fn price_raw(&self) -> Field<f64> {
        self.price.as_ref().and_then(|p| p.raw)
    }

    pub fn price_formatted(&self) -> Field<&str> {
        self.price
            .as_ref()
            .and_then(|p| p.formatted.as_ref())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    pub raw: Field<f64>,
    pub formatted: Field<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Leg {
    pub id: Field<String>,
    pub departure: Field<Timestamp>,
    pub arrival: Field<Timestamp>,
    #[serde(deserialize_with = "deserialize_count")]
    pub duration_in_minutes: Field<u32>,
    #[serde(deserialize_with = "deserialize_count")]
    pub stop_count: Field<u32>,
    pub origin: Field<Place>,
    pub destination: Field<Place>,
    pub carriers: Carriers,
}

impl Leg {
    /// First marketing carrier, the one shown next to the leg.
    pub fn primary_carrier(&self) -> Field<&Carrier> {
        self.carriers.marketing.first().into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Place {
    pub name: Field<String>,
    pub display_code: Field<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Carriers {
    #[serde(deserialize_with = "deserialize_present_list")]
    pub marketing: Vec<Carrier>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Carrier {
    pub name: Field<String>,
    pub logo_url: Field<String>,
}

/// A point in time as reported by the search API.
///
/// Offsetless values (`2024-02-20T10:35:00`) are taken as-is; values with an offset are
/// normalized to UTC so that both kinds compare on one timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        for format in NAIVE_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Timestamp(parsed));
            }
        }
        DateTime::parse_from_rfc3339(s).map(|dt| Timestamp(dt.naive_utc()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(NAIVE_FORMATS[0]))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
