pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::render::OutputFormat;
pub use adapters::source::{InMemorySource, JsonFileSource};
pub use config::{toml_config::TomlConfig, ViewSettings};
pub use crate::core::{
    engine::ResultsEngine,
    view::{ResultsPipeline, ResultsView, ViewState},
};
pub use utils::error::{FlightError, Result};
