use flight_results::core::format::format_duration;
use flight_results::core::paginator::{paginate, HasNextPolicy, PageRequest};
use flight_results::core::sorter::{sort_itineraries, MissingPlacement, SortKey};
use flight_results::core::visibility::{Column, VisibilityMap};
use flight_results::domain::field::Field;
use flight_results::domain::model::{FlightData, Itinerary};
use flight_results::FlightError;

/// Test itineraries, some with fields deliberately left out.
fn collection() -> FlightData {
    let mut entries = Vec::new();
    for i in 0..45u32 {
        let price = if i % 7 == 3 {
            serde_json::Value::Null
        } else {
            serde_json::json!({"raw": f64::from((i * 37) % 500) + 0.5, "formatted": format!("${}", (i * 37) % 500)})
        };
        let legs = if i % 11 == 5 {
            serde_json::json!([null])
        } else {
            serde_json::json!([{
                "id": format!("leg-{}", i),
                "departure": format!("2024-06-{:02}T{:02}:00:00", 1 + i % 28, i % 24),
                "arrival": format!("2024-06-{:02}T{:02}:30:00", 2 + i % 27, (i * 5) % 24),
                "durationInMinutes": (i * 53) % 900,
                "stopCount": i % 3
            }])
        };
        entries.push(serde_json::json!({"id": format!("it-{}", i), "price": price, "legs": legs}));
    }
    let document = serde_json::json!({ "itineraries": entries }).to_string();
    FlightData::from_json_str(&document).expect("generated data parses")
}

fn ids<'a>(items: impl IntoIterator<Item = &'a Itinerary>) -> Vec<String> {
    items
        .into_iter()
        .map(|i| i.id.clone().unwrap_or(String::new()))
        .collect()
}

#[test]
fn sort_is_a_permutation_for_every_key() {
    let data = collection();
    let mut original = ids(data.itineraries().unwrap());
    original.sort();

    for key in SortKey::ALL {
        for placement in [MissingPlacement::First, MissingPlacement::Last] {
            let mut sorted = ids(sort_itineraries(data.itineraries(), key, placement));
            sorted.sort();
            assert_eq!(sorted, original, "key {} lost or duplicated items", key);
        }
    }
}

#[test]
fn sort_none_keeps_original_order() {
    let data = collection();
    let sorted = sort_itineraries(data.itineraries(), SortKey::None, MissingPlacement::Last);
    assert_eq!(ids(sorted), ids(data.itineraries().unwrap()));
}

#[test]
fn price_sort_is_non_decreasing_where_prices_present() {
    let data = collection();
    let sorted = sort_itineraries(data.itineraries(), SortKey::Price, MissingPlacement::Last);
    let prices: Vec<Field<f64>> = sorted
        .iter()
        .map(|i| i.first_leg().and_then(|_| i.price_raw()))
        .collect();

    for pair in prices.windows(2) {
        if let (Field::Present(a), Field::Present(b)) = (pair[0], pair[1]) {
            assert!(a <= b, "{} should not come before {}", a, b);
        }
    }

    let first_missing = prices.iter().position(Field::is_missing).unwrap();
    assert!(prices[first_missing..].iter().all(Field::is_missing));
}

#[test]
fn legless_itinerary_survives_sorting() {
    let data = FlightData::from_json_str(
        r#"{"itineraries": [
            {"id": "ok", "price": {"raw": 10}, "legs": [{"durationInMinutes": 30}]},
            {"id": "hollow", "price": {"raw": 1}, "legs": []},
            {"id": "null-leg", "legs": [null]}
        ]}"#,
    )
    .unwrap();

    for key in SortKey::ALL {
        let sorted = sort_itineraries(data.itineraries(), key, MissingPlacement::Last);
        assert_eq!(sorted.len(), 3);
    }
    let by_duration = sort_itineraries(data.itineraries(), SortKey::Duration, MissingPlacement::Last);
    assert_eq!(ids(by_duration), vec!["ok", "hollow", "null-leg"]);
}

#[test]
fn pagination_edges() {
    let empty: Vec<u8> = Vec::new();
    let page = paginate(&empty, PageRequest::new(0, 20).unwrap(), HasNextPolicy::FullPage);
    assert!(page.visible.is_empty());
    assert!(!page.has_previous);
    assert!(!page.has_next);

    let data = collection();
    let sorted = sort_itineraries(data.itineraries(), SortKey::Price, MissingPlacement::Last);
    let page = paginate(&sorted, PageRequest::new(2, 20).unwrap(), HasNextPolicy::FullPage);
    assert_eq!(page.visible.len(), 5);
    assert!(page.has_previous);
    assert!(!page.has_next);

    assert!(matches!(
        PageRequest::new(0, -20),
        Err(FlightError::InvalidArgument { .. })
    ));
}

#[test]
fn toggle_changes_a_single_column() {
    let map = VisibilityMap::default().toggle(Column::Duration);
    let toggled = map.toggle(Column::Airline);
    for column in Column::ALL {
        if column == Column::Airline {
            assert_ne!(toggled.is_visible(column), map.is_visible(column));
        } else {
            assert_eq!(toggled.is_visible(column), map.is_visible(column));
        }
    }
}

#[test]
fn duration_formatting() {
    assert_eq!(format_duration(125).unwrap(), "2h 5min");
    assert_eq!(format_duration(0).unwrap(), "0h 0min");
    assert!(matches!(
        format_duration(-5),
        Err(FlightError::InvalidArgument { .. })
    ));
}
