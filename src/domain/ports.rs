use crate::domain::model::TableLayout;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Retrieves the raw body of a remote resource.
///
/// A non-success response is an error, so callers never see an error page as data.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn listing_url(&self) -> &str;
    fn base_url(&self) -> &str;
    fn currency_code(&self) -> &str;
    fn start_date(&self) -> NaiveDate;
    fn end_date(&self) -> NaiveDate;
    fn concurrent_requests(&self) -> usize;
    fn timeout_seconds(&self) -> u64;
    fn file_pattern(&self) -> &str;
    fn date_pattern(&self) -> &str;
    fn table_layout(&self) -> TableLayout;
}
