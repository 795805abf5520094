use crate::config::{
    DEFAULT_BASE_URL, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_LISTING_URL, DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::catalog::{DEFAULT_DATE_PATTERN, DEFAULT_FILE_PATTERN};
use crate::domain::model::{RateQuery, TableLayout};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{RatesError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub query: RateQuery,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub layout: TableLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_listing_url")]
    pub listing_url: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub concurrent_requests: Option<usize>,
    pub file_pattern: Option<String>,
    pub date_pattern: Option<String>,
}

fn default_listing_url() -> String {
    DEFAULT_LISTING_URL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RatesError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RatesError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NBP_BASE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RatesError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn query(&self) -> RateQuery {
        self.query.clone()
    }
}

impl ConfigProvider for TomlConfig {
    fn listing_url(&self) -> &str {
        &self.source.listing_url
    }

    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn currency_code(&self) -> &str {
        &self.query.currency_code
    }

    fn start_date(&self) -> NaiveDate {
        self.query.start_date
    }

    fn end_date(&self) -> NaiveDate {
        self.query.end_date
    }

    fn concurrent_requests(&self) -> usize {
        self.extract
            .concurrent_requests
            .unwrap_or(DEFAULT_CONCURRENT_REQUESTS)
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn file_pattern(&self) -> &str {
        self.extract
            .file_pattern
            .as_deref()
            .unwrap_or(DEFAULT_FILE_PATTERN)
    }

    fn date_pattern(&self) -> &str {
        self.extract
            .date_pattern
            .as_deref()
            .unwrap_or(DEFAULT_DATE_PATTERN)
    }

    fn table_layout(&self) -> TableLayout {
        self.layout.clone()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.listing_url", &self.source.listing_url)?;
        validation::validate_url("source.base_url", &self.source.base_url)?;
        validation::validate_currency_code("query.currency_code", &self.query.currency_code)?;
        validation::validate_positive_number(
            "extract.concurrent_requests",
            self.concurrent_requests(),
            1,
        )?;
        validation::validate_positive_number(
            "source.timeout_seconds",
            self.timeout_seconds() as usize,
            1,
        )?;
        validation::validate_pattern("extract.file_pattern", self.file_pattern())?;
        validation::validate_pattern("extract.date_pattern", self.date_pattern())?;
        for (field, value) in [
            ("layout.root", &self.layout.root),
            ("layout.record", &self.layout.record),
            ("layout.currency_code", &self.layout.currency_code),
            ("layout.buying_rate", &self.layout.buying_rate),
            ("layout.selling_rate", &self.layout.selling_rate),
        ] {
            validation::validate_non_empty_string(field, value)?;
        }
        validation::validate_date_range(self.query.start_date, self.query.end_date)
    }
}
