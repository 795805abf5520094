use crate::domain::model::CatalogEntry;
use crate::domain::ports::Fetcher;
use crate::utils::error::{RatesError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;

pub const DEFAULT_FILE_PATTERN: &str = r"c\d+z\d+\.xml";
pub const DEFAULT_DATE_PATTERN: &str = r"\d+-\d+-\d+";

/// Finds the daily table files announced by the listing document.
///
/// File names and dates are matched as two separate token streams and paired by
/// position, so the listing must mention them in the same order. Surplus tokens on
/// either side are dropped.
#[derive(Debug, Clone)]
pub struct CatalogScanner {
    file_regex: Regex,
    date_regex: Regex,
}

impl CatalogScanner {
    pub fn new(file_pattern: &str, date_pattern: &str) -> Result<Self> {
        let compile = |field: &str, pattern: &str| {
            Regex::new(pattern).map_err(|e| RatesError::InvalidConfigValueError {
                field: field.to_string(),
                value: pattern.to_string(),
                reason: format!("Invalid regular expression: {}", e),
            })
        };

        Ok(Self {
            file_regex: compile("file_pattern", file_pattern)?,
            date_regex: compile("date_pattern", date_pattern)?,
        })
    }

    pub async fn scan<F: Fetcher + ?Sized>(
        &self,
        fetcher: &F,
        listing_url: &str,
    ) -> Result<Vec<CatalogEntry>> {
        tracing::info!("Scanning listing {}", listing_url);

        let body = fetcher
            .fetch(listing_url)
            .await
            .map_err(|e| RatesError::CatalogUnavailable {
                url: listing_url.to_string(),
                reason: e.to_string(),
            })?;
        let page = String::from_utf8_lossy(&body);

        let entries = self.parse_listing(&page);
        tracing::info!("Listing announces {} files", entries.len());
        Ok(entries)
    }

    pub fn parse_listing(&self, page: &str) -> Vec<CatalogEntry> {
        let mut seen = HashSet::new();
        let identifiers: Vec<&str> = self
            .file_regex
            .find_iter(page)
            .map(|m| m.as_str())
            .filter(|name| seen.insert(*name))
            .collect();
        let dates: Vec<&str> = self.date_regex.find_iter(page).map(|m| m.as_str()).collect();

        if identifiers.len() != dates.len() {
            tracing::warn!(
                "Listing has {} file names but {} dates, pairing the first {}",
                identifiers.len(),
                dates.len(),
                identifiers.len().min(dates.len())
            );
        }

        identifiers
            .into_iter()
            .zip(dates)
            .filter_map(|(identifier, token)| {
                match NaiveDate::parse_from_str(token, "%Y-%m-%d") {
                    Ok(date) => Some(CatalogEntry {
                        identifier: identifier.to_string(),
                        date,
                    }),
                    Err(e) => {
                        tracing::warn!("Skipping {}: bad date '{}' ({})", identifier, token, e);
                        None
                    }
                }
            })
            .collect()
    }
}

impl Default for CatalogScanner {
    fn default() -> Self {
        Self {
            file_regex: Regex::new(DEFAULT_FILE_PATTERN).expect("default file pattern"),
            date_regex: Regex::new(DEFAULT_DATE_PATTERN).expect("default date pattern"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    const LISTING: &str = r#"
<html><body><table>
<tr><td><a href="c248z151228.xml">c248z151228.xml</a></td><td>2015-12-28</td></tr>
<tr><td><a href="c249z151229.xml">c249z151229.xml</a></td><td>2015-12-29</td></tr>
<tr><td><a href="c250z151230.xml">c250z151230.xml</a></td><td>2015-12-30</td></tr>
</table></body></html>
"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct FailingFetcher;

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            Err(RatesError::HttpStatus {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    struct StaticFetcher(&'static str);

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_pairs_names_with_dates_in_order() {
        let entries = CatalogScanner::default().parse_listing(LISTING);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].identifier, "c248z151228.xml");
        assert_eq!(entries[0].date, date(2015, 12, 28));
        assert_eq!(entries[2].identifier, "c250z151230.xml");
        assert_eq!(entries[2].date, date(2015, 12, 30));
    }

    #[test]
    fn test_repeated_names_count_once() {
        // The href and the link text both mention each file.
        let entries = CatalogScanner::default().parse_listing(LISTING);
        let names: Vec<&str> = entries.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(
            names,
            vec!["c248z151228.xml", "c249z151229.xml", "c250z151230.xml"]
        );
    }

    #[test]
    fn test_surplus_tokens_are_ignored() {
        let page = "c001z160104.xml 2016-01-04 c002z160105.xml 2016-01-05 2016-01-06";
        let entries = CatalogScanner::default().parse_listing(page);
        assert_eq!(entries.len(), 2);

        let page = "c001z160104.xml c002z160105.xml 2016-01-04";
        let entries = CatalogScanner::default().parse_listing(page);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].identifier, "c001z160104.xml");
    }

    #[test]
    fn test_invalid_date_drops_only_its_pair() {
        let page = "c001z160104.xml 2016-13-45 c002z160105.xml 2016-01-05";
        let entries = CatalogScanner::default().parse_listing(page);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].identifier, "c002z160105.xml");
        assert_eq!(entries[0].date, date(2016, 1, 5));
    }

    #[test]
    fn test_empty_listing_yields_no_entries() {
        assert!(CatalogScanner::default().parse_listing("nothing here").is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(CatalogScanner::new(r"c(\d+", DEFAULT_DATE_PATTERN).is_err());
    }

    #[tokio::test]
    async fn test_scan_failure_is_catalog_unavailable() {
        let err = CatalogScanner::default()
            .scan(&FailingFetcher, "http://localhost/dir.aspx")
            .await
            .unwrap_err();
        assert!(matches!(err, RatesError::CatalogUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_scan_with_no_matches_is_ok_and_empty() {
        let entries = CatalogScanner::default()
            .scan(&StaticFetcher("<html>maintenance</html>"), "http://localhost/dir.aspx")
            .await
            .unwrap();
        assert!(entries.is_empty());
    }
}
