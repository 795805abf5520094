pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, OutputFormat};
pub use crate::config::TomlConfig;

pub use crate::adapters::HttpFetcher;
pub use crate::core::analysis::RateAnalysis;
pub use crate::domain::model::{AnalysisOutcome, RateQuery, RateSummary};
pub use crate::utils::error::{RatesError, Result};
