use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatesError {
    #[error("Catalog unavailable at {url}: {reason}")]
    CatalogUnavailable { url: String, reason: String },

    #[error("Failed to fetch {url}: {reason}")]
    FileFetchFailed { url: String, reason: String },

    #[error("Request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },

    #[error("No observations to aggregate for {currency_code}")]
    NoObservations { currency_code: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RatesError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RatesError::CatalogUnavailable { .. }
            | RatesError::FileFetchFailed { .. }
            | RatesError::HttpStatus { .. }
            | RatesError::ApiError(_) => ErrorCategory::Network,
            RatesError::XmlError(_) | RatesError::InvalidDocument { .. } => ErrorCategory::Parsing,
            RatesError::NoObservations { .. } => ErrorCategory::Data,
            RatesError::ConfigError { .. }
            | RatesError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RatesError::IoError(_) | RatesError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RatesError::NoObservations { .. } => ErrorSeverity::Low,
            RatesError::CatalogUnavailable { .. }
            | RatesError::FileFetchFailed { .. }
            | RatesError::HttpStatus { .. }
            | RatesError::ApiError(_) => ErrorSeverity::Medium,
            RatesError::XmlError(_)
            | RatesError::InvalidDocument { .. }
            | RatesError::ConfigError { .. }
            | RatesError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            RatesError::IoError(_) | RatesError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RatesError::CatalogUnavailable { url, .. } => {
                format!("Could not download the list of rate tables from {}", url)
            }
            RatesError::FileFetchFailed { url, .. } | RatesError::HttpStatus { url, .. } => {
                format!("Could not download {}", url)
            }
            RatesError::NoObservations { currency_code } => {
                format!("No values were parsed for {}", currency_code)
            }
            RatesError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the network connection and the listing/base URLs, then retry"
            }
            ErrorCategory::Parsing => "The remote document format may have changed",
            ErrorCategory::Data => "Try a wider date range or another currency code",
            ErrorCategory::Configuration => "Fix the configuration value and run again",
            ErrorCategory::System => "Check file permissions and available resources",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, RatesError>;
