use crate::config::{
    DEFAULT_BASE_URL, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_CURRENCY, DEFAULT_END_DATE,
    DEFAULT_LISTING_URL, DEFAULT_START_DATE, DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::catalog::{DEFAULT_DATE_PATTERN, DEFAULT_FILE_PATTERN};
use crate::domain::model::{RateQuery, TableLayout};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "nbp-rates")]
#[command(about = "Exchange rate statistics from the NBP daily tables")]
pub struct CliConfig {
    /// Currency code, matched exactly against the tables
    #[arg(short, long = "currency", default_value = DEFAULT_CURRENCY)]
    pub currency_code: String,

    /// First publication date to include (YYYY-MM-DD)
    #[arg(long, default_value = DEFAULT_START_DATE)]
    pub start_date: NaiveDate,

    /// Last publication date to include (YYYY-MM-DD)
    #[arg(long, default_value = DEFAULT_END_DATE)]
    pub end_date: NaiveDate,

    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    pub listing_url: String,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value_t = DEFAULT_CONCURRENT_REQUESTS)]
    pub concurrent_requests: usize,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn query(&self) -> RateQuery {
        RateQuery {
            currency_code: self.currency_code.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn currency_code(&self) -> &str {
        &self.currency_code
    }

    fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn file_pattern(&self) -> &str {
        DEFAULT_FILE_PATTERN
    }

    fn date_pattern(&self) -> &str {
        DEFAULT_DATE_PATTERN
    }

    fn table_layout(&self) -> TableLayout {
        TableLayout::default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("listing_url", &self.listing_url)?;
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_currency_code("currency", &self.currency_code)?;
        validation::validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;
        validation::validate_date_range(self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["nbp-rates"]);
        assert_eq!(config.currency_code, "USD");
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2015, 12, 28).unwrap());
        assert_eq!(config.end_date, NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
        assert_eq!(config.listing_url, DEFAULT_LISTING_URL);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::parse_from([
            "nbp-rates",
            "--currency",
            "EUR",
            "--start-date",
            "2016-01-04",
            "--end-date",
            "2016-01-04",
            "--format",
            "json",
        ]);
        let query = config.query();
        assert_eq!(query.currency_code, "EUR");
        assert_eq!(query.start_date, query.end_date);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_zero_concurrency_is_invalid() {
        let config = CliConfig::parse_from(["nbp-rates", "--concurrent-requests", "0"]);
        assert!(config.validate().is_err());
    }
}
