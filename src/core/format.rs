use crate::domain::field::Field;
use crate::domain::model::{Place, Timestamp};
use crate::utils::error::{FlightError, Result};

/// Shown in place of any value the search response did not provide.
pub const MISSING_PLACEHOLDER: &str = "n/a";

const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Renders a duration as `"{hours}h {minutes}min"`.
pub fn format_duration(minutes: i64) -> Result<String> {
    if minutes < 0 {
        return Err(FlightError::invalid_argument(
            "duration_in_minutes",
            minutes,
            "duration must not be negative",
        ));
    }
    Ok(format!("{}h {}min", minutes / 60, minutes % 60))
}

pub fn format_stops(stop_count: u32) -> String {
    match stop_count {
        0 => "Non-stop".to_string(),
        n => format!("{} stop(s)", n),
    }
}

pub fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.as_naive().format(DISPLAY_TIME_FORMAT).to_string()
}

/// `"London Heathrow (LHR)"`, degrading to whichever half is present.
pub fn format_place(place: Field<&Place>) -> String {
    let Field::Present(place) = place else {
        return MISSING_PLACEHOLDER.to_string();
    };
    match (place.name.as_ref(), place.display_code.as_ref()) {
        (Field::Present(name), Field::Present(code)) => format!("{} ({})", name, code),
        (Field::Present(name), Field::Missing) => name.clone(),
        (Field::Missing, Field::Present(code)) => code.clone(),
        (Field::Missing, Field::Missing) => MISSING_PLACEHOLDER.to_string(),
    }
}

pub fn display_or_placeholder(value: Field<String>) -> String {
    value.unwrap_or(MISSING_PLACEHOLDER.to_string())
}
