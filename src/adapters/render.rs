use crate::core::view::{visible_headers, LegRow, ResultsView};
use crate::core::Renderer;
use crate::utils::error::{FlightError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["text", "csv", "json"];
}

impl FromStr for OutputFormat {
    type Err = FlightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(FlightError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: format!("Valid formats: {}", OutputFormat::NAMES.join(", ")),
            }),
        }
    }
}

impl Renderer for OutputFormat {
    fn render(&self, view: &ResultsView) -> Result<String> {
        match self {
            OutputFormat::Text => TextRenderer.render(view),
            OutputFormat::Csv => CsvRenderer.render(view),
            OutputFormat::Json => JsonRenderer.render(view),
        }
    }
}

fn visible_cells(view: &ResultsView, row: &LegRow) -> Vec<(&'static str, String)> {
    view.visibility
        .visible_columns()
        .into_iter()
        .flat_map(|column| row.cells(column))
        .map(|(header, value)| (header, value.to_string()))
        .collect()
}

/// Human-readable listing: one block per leg, then the pagination controls.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    fn write_listing(out: &mut String, view: &ResultsView) -> std::fmt::Result {
        writeln!(
            out,
            "Flight Itineraries (sort: {}, page {})",
            view.sort_key,
            view.page + 1
        )?;

        if view.rows.is_empty() {
            writeln!(out, "\nNo itineraries to show.")?;
        }

        for row in &view.rows {
            writeln!(out)?;
            let cells = visible_cells(view, row);
            if cells.is_empty() {
                writeln!(out, "  {}", row.leg_id)?;
                continue;
            }
            for (header, value) in cells {
                writeln!(out, "  {:<12} {}", format!("{}:", header), value)?;
            }
        }

        writeln!(
            out,
            "\n[{}] Previous    Next [{}]   ({} of {} itineraries)",
            if view.has_previous { "<" } else { " " },
            if view.has_next { ">" } else { " " },
            view.itineraries_shown,
            view.total_itineraries
        )
    }
}

impl Renderer for TextRenderer {
    fn render(&self, view: &ResultsView) -> Result<String> {
        let mut out = String::new();
        Self::write_listing(&mut out, view)
            .map_err(|e| FlightError::IoError(std::io::Error::other(e)))?;
        Ok(out)
    }
}

/// One CSV record per leg, restricted to the visible columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl Renderer for CsvRenderer {
    fn render(&self, view: &ResultsView) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut headers = vec!["itinerary_id", "leg_id"];
        headers.extend(visible_headers(&view.visibility));
        writer.write_record(&headers)?;

        for row in &view.rows {
            let mut record = vec![row.itinerary_id.clone(), row.leg_id.clone()];
            record.extend(visible_cells(view, row).into_iter().map(|(_, value)| value));
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| FlightError::IoError(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// JSON document with the page flags and the visible fields of each leg.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, view: &ResultsView) -> Result<String> {
        let rows: Vec<serde_json::Value> = view
            .rows
            .iter()
            .map(|row| {
                let mut object = serde_json::Map::new();
                object.insert("itinerary_id".to_string(), row.itinerary_id.clone().into());
                object.insert("leg_id".to_string(), row.leg_id.clone().into());
                for (header, value) in visible_cells(view, row) {
                    object.insert(header.to_ascii_lowercase(), value.into());
                }
                if view.visibility.is_visible(crate::core::visibility::Column::Airline) {
                    if let Some(logo) = &row.airline_logo {
                        object.insert("airline_logo".to_string(), logo.clone().into());
                    }
                }
                serde_json::Value::Object(object)
            })
            .collect();

        let document = serde_json::json!({
            "page": view.page,
            "page_size": view.page_size,
            "sort_key": view.sort_key,
            "has_previous": view.has_previous,
            "has_next": view.has_next,
            "total_itineraries": view.total_itineraries,
            "visibility": view.visibility,
            "rows": rows,
        });
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
