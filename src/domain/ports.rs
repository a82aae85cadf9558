use crate::core::paginator::HasNextPolicy;
use crate::core::sorter::MissingPlacement;
use crate::core::view::ResultsView;
use crate::domain::model::FlightData;
use crate::utils::error::Result;

/// Supplies the raw itinerary collection for one rendering cycle.
pub trait ItinerarySource {
    fn load(&self) -> Result<FlightData>;
}

pub trait ViewConfigProvider {
    fn page_size(&self) -> i64;
    fn missing_placement(&self) -> MissingPlacement;
    fn has_next_policy(&self) -> HasNextPolicy;
}

/// Turns a computed page into output. Implementations decide the layout but must only
/// show the columns marked visible in the view.
pub trait Renderer {
    fn render(&self, view: &ResultsView) -> Result<String>;
}
