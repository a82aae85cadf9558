use crate::core::{FlightData, ItinerarySource};
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a saved search response from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ItinerarySource for JsonFileSource {
    fn load(&self) -> Result<FlightData> {
        tracing::debug!("Reading flight data from {}", self.path.display());
        let content = fs::read_to_string(&self.path)?;
        FlightData::from_json_str(&content)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    data: FlightData,
}

impl InMemorySource {
    pub fn new(data: FlightData) -> Self {
        Self { data }
    }
}

impl ItinerarySource for InMemorySource {
    fn load(&self) -> Result<FlightData> {
        Ok(self.data.clone())
    }
}
