use crate::core::view::{ResultsPipeline, ResultsView, ViewState};
use crate::core::{ItinerarySource, Renderer};
use crate::domain::model::FlightData;
use crate::utils::error::Result;

/// Drives one rendering cycle: load the collection, compute the page, render it.
pub struct ResultsEngine<S: ItinerarySource, R: Renderer> {
    source: S,
    renderer: R,
    pipeline: ResultsPipeline,
}

impl<S: ItinerarySource, R: Renderer> ResultsEngine<S, R> {
    pub fn new(source: S, renderer: R, pipeline: ResultsPipeline) -> Self {
        Self {
            source,
            renderer,
            pipeline,
        }
    }

    pub fn load(&self) -> Result<FlightData> {
        tracing::debug!("Loading itineraries...");
        let data = self.source.load()?;
        tracing::info!("Loaded {} itineraries", data.len());
        if data.itineraries().is_none() {
            tracing::warn!("Response carried no itinerary collection, showing an empty list");
        }
        Ok(data)
    }

    /// Computes and renders a page from already loaded data, so an interactive session
    /// can re-render without reloading.
    pub fn render_state(&self, data: &FlightData, state: &ViewState) -> Result<(ResultsView, String)> {
        let view = self.pipeline.compute(data, state)?;
        tracing::debug!(
            "Rendering page {} ({} rows, sort: {})",
            view.page,
            view.rows.len(),
            view.sort_key
        );
        let output = self.renderer.render(&view)?;
        Ok((view, output))
    }

    pub fn run(&self, state: &ViewState) -> Result<String> {
        let data = self.load()?;
        let (view, output) = self.render_state(&data, state)?;
        tracing::info!(
            "Showing {} of {} itineraries on page {}",
            view.itineraries_shown,
            view.total_itineraries,
            view.page
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::source::InMemorySource;
    use crate::utils::error::FlightError;

    struct CountingRenderer;

    impl Renderer for CountingRenderer {
        fn render(&self, view: &ResultsView) -> Result<String> {
            Ok(format!("{} rows", view.rows.len()))
        }
    }

    struct FailingSource;

    impl ItinerarySource for FailingSource {
        fn load(&self) -> Result<FlightData> {
            Err(FlightError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "flights.json",
            )))
        }
    }

    #[test]
    fn test_run_renders_loaded_page() {
        let data = FlightData::from_json_str(
            r#"{"itineraries": [{"legs": [{"id": "a"}]}, {"legs": [{"id": "b"}, {"id": "c"}]}]}"#,
        )
        .unwrap();
        let engine = ResultsEngine::new(
            InMemorySource::new(data),
            CountingRenderer,
            ResultsPipeline::default(),
        );
        assert_eq!(engine.run(&ViewState::default()).unwrap(), "3 rows");
    }

    #[test]
    fn test_source_errors_propagate() {
        let engine = ResultsEngine::new(FailingSource, CountingRenderer, ResultsPipeline::default());
        assert!(matches!(
            engine.run(&ViewState::default()),
            Err(FlightError::IoError(_))
        ));
    }
}
