use anyhow::Result;
use flight_results::core::session::{Command, Step};
use flight_results::core::sorter::SortKey;
use flight_results::core::visibility::Column;
use flight_results::{
    JsonFileSource, OutputFormat, ResultsEngine, ResultsPipeline, TomlConfig, ViewSettings,
};
use tempfile::TempDir;

const SEARCH_RESPONSE: &str = r#"{
  "status": true,
  "data": {
    "itineraries": [
      {
        "id": "it-expensive",
        "price": {"raw": 812.4, "formatted": "$813"},
        "legs": [{
          "id": "leg-expensive",
          "origin": {"name": "London Heathrow", "displayCode": "LHR"},
          "destination": {"name": "Singapore Changi", "displayCode": "SIN"},
          "durationInMinutes": 790,
          "stopCount": 0,
          "departure": "2024-02-20T21:00:00",
          "arrival": "2024-02-21T18:10:00",
          "carriers": {"marketing": [{"name": "Singapore Airlines", "logoUrl": "https://logos/sq.png"}]}
        }]
      },
      {
        "id": "it-cheap",
        "price": {"raw": 455.0, "formatted": "$455"},
        "legs": [{
          "id": "leg-cheap",
          "origin": {"name": "London Gatwick", "displayCode": "LGW"},
          "destination": {"name": "Singapore Changi", "displayCode": "SIN"},
          "durationInMinutes": 1105,
          "stopCount": 1,
          "departure": "2024-02-20T09:45:00",
          "arrival": "2024-02-21T12:10:00",
          "carriers": {"marketing": [{"name": "Turkish Airlines", "logoUrl": "https://logos/tk.png"}]}
        }]
      },
      {
        "id": "it-unpriced",
        "legs": [{
          "id": "leg-unpriced",
          "durationInMinutes": 900,
          "stopCount": 2,
          "departure": "2024-02-20T06:15:00",
          "arrival": "2024-02-21T02:15:00",
          "carriers": {"marketing": []}
        }]
      }
    ]
  }
}"#;

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> Result<String> {
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok(path.to_string_lossy().into_owned())
}

/// Full run: read the file, sort, page, write CSV.
#[test]
fn test_file_to_csv_sorted_by_price() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_fixture(&temp_dir, "search.json", SEARCH_RESPONSE)?;
    let config_path = write_fixture(
        &temp_dir,
        "view.toml",
        r#"
[view]
page_size = 2
default_sort = "price"

[columns]
departure = false
arrival = false

[output]
format = "csv"
"#,
    )?;

    let settings = TomlConfig::from_file(&config_path)?.settings()?;
    let engine = ResultsEngine::new(
        JsonFileSource::new(&input),
        settings.format,
        ResultsPipeline::from_config(&settings)?,
    );

    let first_page = engine.run(&settings.initial_state(0))?;
    let lines: Vec<&str> = first_page.lines().collect();
    assert_eq!(lines[0], "itinerary_id,leg_id,Airline,Duration,Stops,Price");
    assert_eq!(lines[1], "it-cheap,leg-cheap,Turkish Airlines,18h 25min,1 stop(s),$455");
    assert_eq!(lines[2], "it-expensive,leg-expensive,Singapore Airlines,13h 10min,Non-stop,$813");
    assert_eq!(lines.len(), 3);

    let second_page = engine.run(&settings.initial_state(1))?;
    assert!(second_page.contains("it-unpriced,leg-unpriced,n/a,15h 0min,2 stop(s),n/a"));
    Ok(())
}

#[test]
fn test_json_output_reports_page_flags() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_fixture(&temp_dir, "search.json", SEARCH_RESPONSE)?;

    let settings = ViewSettings {
        page_size: 1,
        format: OutputFormat::Json,
        ..ViewSettings::default()
    };
    let engine = ResultsEngine::new(
        JsonFileSource::new(&input),
        settings.format,
        ResultsPipeline::from_config(&settings)?,
    );

    let state = settings.initial_state(0).with_sort_key(SortKey::Departure);
    let value: serde_json::Value = serde_json::from_str(&engine.run(&state)?)?;
    assert_eq!(value["rows"][0]["leg_id"], "leg-unpriced");
    assert_eq!(value["has_previous"], false);
    assert_eq!(value["has_next"], true);

    let last: serde_json::Value = serde_json::from_str(&engine.run(&state.next_page().next_page())?)?;
    assert_eq!(last["rows"][0]["leg_id"], "leg-expensive");
    assert_eq!(last["has_previous"], true);
    // a full last page still reports a next page
    assert_eq!(last["has_next"], true);

    let past: serde_json::Value =
        serde_json::from_str(&engine.run(&state.next_page().next_page().next_page())?)?;
    assert_eq!(past["rows"].as_array().map(Vec::len), Some(0));
    assert_eq!(past["has_next"], false);
    Ok(())
}

#[test]
fn test_interactive_commands_drive_rendering() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_fixture(&temp_dir, "search.json", SEARCH_RESPONSE)?;
    let settings = ViewSettings::default();
    let engine = ResultsEngine::new(
        JsonFileSource::new(&input),
        OutputFormat::Text,
        ResultsPipeline::from_config(&settings)?,
    );
    let data = engine.load()?;

    let mut state = settings.initial_state(0);
    for line in ["sort duration", "toggle airline"] {
        let (current, _) = engine.render_state(&data, &state)?;
        state = match line.parse::<Command>()?.apply(state, &current) {
            Step::Render(next) => next,
            other => anyhow::bail!("unexpected step for {:?}: {:?}", line, other),
        };
    }
    assert!(!state.visibility.is_visible(Column::Airline));

    let (view, text) = engine.render_state(&data, &state)?;
    assert_eq!(view.rows[0].leg_id, "leg-expensive");
    assert!(!text.contains("Singapore Airlines"));
    assert!(text.contains("13h 10min"));
    Ok(())
}

#[test]
fn test_next_on_last_page_stays() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_fixture(&temp_dir, "search.json", SEARCH_RESPONSE)?;
    let settings = ViewSettings {
        page_size: 5,
        ..ViewSettings::default()
    };
    let engine = ResultsEngine::new(
        JsonFileSource::new(&input),
        OutputFormat::Text,
        ResultsPipeline::from_config(&settings)?,
    );
    let data = engine.load()?;

    let state = settings.initial_state(0);
    let (current, _) = engine.render_state(&data, &state)?;
    assert_eq!(current.rows.len(), 3);
    assert!(!current.has_next);

    let step = "next".parse::<Command>()?.apply(state, &current);
    assert_eq!(step, Step::Stay("Already on the last page."));

    let (after, text) = engine.render_state(&data, &state)?;
    assert_eq!(after.page, 0);
    assert_eq!(after.rows.len(), 3);
    assert!(!text.contains("No itineraries to show."));
    Ok(())
}

#[test]
fn test_missing_input_file_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let engine = ResultsEngine::new(
        JsonFileSource::new(temp_dir.path().join("absent.json")),
        OutputFormat::Text,
        ResultsPipeline::default(),
    );
    let err = engine.run(&ViewSettings::default().initial_state(0)).unwrap_err();
    assert!(err.user_friendly_message().contains("Could not read"));
    Ok(())
}
