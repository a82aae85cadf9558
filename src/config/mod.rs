pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::render::OutputFormat;
#[cfg(feature = "cli")]
use crate::core::sorter::SortKey;
#[cfg(feature = "cli")]
use crate::core::visibility::Column;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

pub use settings::ViewSettings;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "flight-results")]
#[command(about = "Sort, page and filter the itineraries of a saved flight search")]
pub struct CliConfig {
    /// Search response JSON to read
    #[arg(short, long, default_value = "flights.json")]
    pub input: String,

    /// Optional TOML file with listing defaults
    #[arg(short, long)]
    pub config: Option<String>,

    /// price, departure, arrival, duration or none
    #[arg(long)]
    pub sort: Option<String>,

    /// Zero-based page index
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub page: i64,

    #[arg(long, allow_negative_numbers = true)]
    pub page_size: Option<i64>,

    /// Columns to hide, comma separated
    #[arg(long, value_delimiter = ',')]
    pub hide: Vec<String>,

    /// text, csv or json
    #[arg(long)]
    pub format: Option<String>,

    /// Read navigation commands from stdin
    #[arg(long)]
    pub interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Applies the command line overrides on top of `base`.
    pub fn apply_to(&self, base: ViewSettings) -> Result<ViewSettings> {
        let mut settings = base;

        if let Some(page_size) = self.page_size {
            settings.page_size = page_size;
        }
        if let Some(sort) = &self.sort {
            settings.default_sort = SortKey::parse_lenient(sort);
        }
        for name in &self.hide {
            settings.columns = settings.columns.with(name.parse::<Column>()?, false);
        }
        if let Some(format) = &self.format {
            settings.format = format.parse::<OutputFormat>()?;
        }

        Ok(settings)
    }

    /// The requested page, clamped at zero.
    pub fn initial_page(&self) -> usize {
        if self.page < 0 {
            tracing::warn!("Page {} is negative, starting at page 0", self.page);
        }
        usize::try_from(self.page.max(0)).unwrap_or(usize::MAX)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        if let Some(page_size) = self.page_size {
            validate_positive_number("page_size", page_size, 1)?;
        }
        for name in &self.hide {
            name.parse::<Column>()?;
        }
        if let Some(format) = &self.format {
            format.parse::<OutputFormat>()?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply_flags() {
        let config = CliConfig::parse_from([
            "flight-results",
            "--input",
            "search.json",
            "--sort",
            "duration",
            "--page-size",
            "5",
            "--hide",
            "airline,stops",
            "--format",
            "csv",
        ]);
        assert!(config.validate().is_ok());

        let settings = config.apply_to(ViewSettings::default()).unwrap();
        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.default_sort, SortKey::Duration);
        assert!(!settings.columns.is_visible(Column::Airline));
        assert!(!settings.columns.is_visible(Column::Stops));
        assert!(settings.columns.is_visible(Column::Arrival));
        assert_eq!(settings.format, OutputFormat::Csv);
    }

    #[test]
    fn test_negative_page_is_clamped() {
        let config = CliConfig::parse_from(["flight-results", "--page", "-2"]);
        assert_eq!(config.initial_page(), 0);
    }

    #[test]
    fn test_invalid_flags_fail_validation() {
        let bad_size = CliConfig::parse_from(["flight-results", "--page-size", "-1"]);
        assert!(bad_size.validate().is_err());

        let bad_column = CliConfig::parse_from(["flight-results", "--hide", "price"]);
        assert!(bad_column.validate().is_err());
    }
}
