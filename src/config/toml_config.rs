use crate::adapters::render::OutputFormat;
use crate::config::settings::{ViewSettings, MAX_PAGE_SIZE};
use crate::core::paginator::HasNextPolicy;
use crate::core::sorter::{MissingPlacement, SortKey};
use crate::core::visibility::VisibilityMap;
use crate::core::ViewConfigProvider;
use crate::utils::error::{FlightError, Result};
use crate::utils::validation::{validate_one_of, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub view: ViewConfig,
    /// Unknown column names are rejected while parsing.
    pub columns: Option<VisibilityMap>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    pub page_size: Option<i64>,
    pub default_sort: Option<String>,
    pub missing_placement: Option<MissingPlacement>,
    pub has_next: Option<HasNextPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML text, substituting `${VAR}` references first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FlightError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FlightError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Checks value ranges and names that parsing alone does not catch.
    pub fn validate_config(&self) -> Result<()> {
        if let Some(page_size) = self.view.page_size {
            validate_range("view.page_size", page_size, 1, MAX_PAGE_SIZE)?;
        }

        if let Some(format) = self.output.as_ref().and_then(|o| o.format.as_deref()) {
            validate_one_of("output.format", &format.to_ascii_lowercase(), &OutputFormat::NAMES)?;
        }

        Ok(())
    }

    /// Layers this file over `base`; settings the file leaves out keep their base value.
    /// A `[columns]` table replaces the base visibility, with unlisted columns visible.
    pub fn apply_to(&self, base: ViewSettings) -> Result<ViewSettings> {
        self.validate_config()?;
        let mut settings = base;

        if let Some(page_size) = self.view.page_size {
            settings.page_size = page_size;
        }
        if let Some(sort) = &self.view.default_sort {
            settings.default_sort = SortKey::parse_lenient(sort);
        }
        if let Some(placement) = self.view.missing_placement {
            settings.missing_placement = placement;
        }
        if let Some(policy) = self.view.has_next {
            settings.has_next = policy;
        }
        if let Some(columns) = self.columns {
            settings.columns = columns;
        }
        if let Some(format) = self.output.as_ref().and_then(|o| o.format.as_deref()) {
            settings.format = format.parse()?;
        }

        Ok(settings)
    }

    pub fn settings(&self) -> Result<ViewSettings> {
        self.apply_to(ViewSettings::default())
    }
}

impl ViewConfigProvider for TomlConfig {
    fn page_size(&self) -> i64 {
        self.view
            .page_size
            .unwrap_or(crate::core::paginator::DEFAULT_PAGE_SIZE)
    }

    fn missing_placement(&self) -> MissingPlacement {
        self.view.missing_placement.unwrap_or_default()
    }

    fn has_next_policy(&self) -> HasNextPolicy {
        self.view.has_next.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
