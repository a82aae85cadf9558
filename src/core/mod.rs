pub mod engine;
pub mod format;
pub mod paginator;
pub mod session;
pub mod sorter;
pub mod view;
pub mod visibility;

pub use crate::domain::model::{FlightData, Itinerary, Leg};
pub use crate::domain::ports::{ItinerarySource, Renderer, ViewConfigProvider};
pub use crate::utils::error::Result;
