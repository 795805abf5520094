#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub const DEFAULT_LISTING_URL: &str = "http://www.nbp.pl/kursy/xml/dir.aspx?tt=C";
pub const DEFAULT_BASE_URL: &str = "http://www.nbp.pl/kursy/xml/";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_START_DATE: &str = "2015-12-28";
pub const DEFAULT_END_DATE: &str = "2016-01-01";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 4;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, OutputFormat};
pub use toml_config::TomlConfig;
