//! Absence-tolerant field values.
//!
//! Flight search responses routinely omit or malform individual fields. Rather than
//! failing a whole document, every optional attribute is parsed into a [`Field`]:
//! `null`, missing keys and values of the wrong shape all become [`Field::Missing`],
//! which downstream code has to handle explicitly.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<T> {
    Present(T),
    Missing,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T> Field<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Present(value) => Field::Present(value),
            Field::Missing => Field::Missing,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Field::Present(value) => Field::Present(f(value)),
            Field::Missing => Field::Missing,
        }
    }

    pub fn and_then<U, F: FnOnce(T) -> Field<U>>(self, f: F) -> Field<U> {
        match self {
            Field::Present(value) => f(value),
            Field::Missing => Field::Missing,
        }
    }

    pub fn present(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Missing => None,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        self.present().unwrap_or(default)
    }
}

impl<T: DeserializeOwned> Field<T> {
    /// Converts an already-parsed JSON value, degrading anything unusable to `Missing`.
    pub fn from_json_value(value: serde_json::Value) -> Self {
        if value.is_null() {
            return Field::Missing;
        }
        match serde_json::from_value::<T>(value) {
            Ok(parsed) => Field::Present(parsed),
            Err(e) => {
                tracing::debug!("Malformed field treated as missing: {}", e);
                Field::Missing
            }
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Present(v),
            None => Field::Missing,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Field::from_json_value(value))
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Field::Present(value) => value.serialize(serializer),
            Field::Missing => serializer.serialize_none(),
        }
    }
}

/// Array whose elements may individually be absent (`[{..}, null, {..}]`).
/// A non-array value yields an empty list.
pub(crate) fn deserialize_field_list<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Vec<Field<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => {
            Ok(items.into_iter().map(Field::from_json_value).collect())
        }
        serde_json::Value::Null => Ok(Vec::new()),
        other => {
            tracing::debug!("Expected an array, got {}; using empty list", other);
            Ok(Vec::new())
        }
    }
}

/// Array whose unusable elements are skipped.
pub(crate) fn deserialize_present_list<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(deserialize_field_list::<D, T>(deserializer)?
        .into_iter()
        .filter_map(Field::present)
        .collect())
}

/// Non-negative count such as minutes or stops. Whole-number floats (`125.0`) are
/// accepted; fractions, negatives and values beyond `u32` are `Missing`.
pub(crate) fn deserialize_count<'de, D>(
    deserializer: D,
) -> std::result::Result<Field<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let count = match &value {
        serde_json::Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u64)
        }),
        _ => None,
    };
    match count.and_then(|c| u32::try_from(c).ok()) {
        Some(c) => Ok(Field::Present(c)),
        None => {
            if !value.is_null() {
                tracing::debug!("Malformed count treated as missing: {}", value);
            }
            Ok(Field::Missing)
        }
    }
}
