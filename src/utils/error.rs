use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlightError {
    #[error("Invalid argument '{field}' = {value}: {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Caller,
    Input,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FlightError {
    pub fn invalid_argument(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        FlightError::InvalidArgument {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FlightError::InvalidArgument { .. } => ErrorCategory::Caller,
            FlightError::IoError(_) | FlightError::SerializationError(_) => ErrorCategory::Input,
            FlightError::CsvError(_) => ErrorCategory::Output,
            FlightError::ConfigError { .. }
            | FlightError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FlightError::InvalidArgument { .. } => ErrorSeverity::High,
            FlightError::IoError(_) => ErrorSeverity::Critical,
            FlightError::SerializationError(_) => ErrorSeverity::Medium,
            FlightError::CsvError(_) => ErrorSeverity::High,
            FlightError::ConfigError { .. }
            | FlightError::InvalidConfigValueError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FlightError::InvalidArgument { .. } => {
                "Check the values passed to the pipeline (page size must be at least 1, durations non-negative)"
            }
            FlightError::IoError(_) => "Make sure the input file exists and is readable",
            FlightError::SerializationError(_) => {
                "Make sure the input is a JSON document with an 'itineraries' array"
            }
            FlightError::CsvError(_) => "Try another output format such as --format text",
            FlightError::ConfigError { .. } | FlightError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FlightError::InvalidArgument { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
            FlightError::IoError(e) => format!("Could not read or write a file: {}", e),
            FlightError::SerializationError(e) => format!("Could not parse flight data: {}", e),
            FlightError::CsvError(e) => format!("Could not write CSV output: {}", e),
            FlightError::ConfigError { message } => format!("Configuration problem: {}", message),
            FlightError::InvalidConfigValueError { field, value, reason } => {
                format!("Setting '{}' has invalid value '{}': {}", field, value, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FlightError>;
