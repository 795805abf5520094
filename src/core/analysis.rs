use crate::core::aggregator::aggregate;
use crate::core::catalog::CatalogScanner;
use crate::core::extractor::RateExtractor;
use crate::core::filter::filter_entries;
use crate::domain::model::{AnalysisOutcome, RateQuery};
use crate::domain::ports::{ConfigProvider, Fetcher};
use crate::utils::error::Result;

/// Runs scan, filter, extract and aggregate for one query.
pub struct RateAnalysis<F: Fetcher> {
    fetcher: F,
    scanner: CatalogScanner,
    extractor: RateExtractor,
    listing_url: String,
    base_url: String,
    concurrent_requests: usize,
}

impl<F: Fetcher> RateAnalysis<F> {
    pub fn new(
        fetcher: F,
        scanner: CatalogScanner,
        extractor: RateExtractor,
        listing_url: impl Into<String>,
        base_url: impl Into<String>,
        concurrent_requests: usize,
    ) -> Self {
        Self {
            fetcher,
            scanner,
            extractor,
            listing_url: listing_url.into(),
            base_url: base_url.into(),
            concurrent_requests,
        }
    }

    pub fn from_config<C: ConfigProvider>(fetcher: F, config: &C) -> Result<Self> {
        let scanner = CatalogScanner::new(config.file_pattern(), config.date_pattern())?;
        Ok(Self::new(
            fetcher,
            scanner,
            RateExtractor::new(config.table_layout()),
            config.listing_url(),
            config.base_url(),
            config.concurrent_requests(),
        ))
    }

    pub fn file_url(&self, identifier: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, identifier)
        } else {
            format!("{}/{}", self.base_url, identifier)
        }
    }

    /// Lists the identifiers that fall inside the query's date range.
    pub async fn select_files(&self, query: &RateQuery) -> Result<Vec<String>> {
        let entries = self.scanner.scan(&self.fetcher, &self.listing_url).await?;
        let selected = filter_entries(entries, query.start_date, query.end_date);
        tracing::info!(
            "{} files between {} and {}",
            selected.len(),
            query.start_date,
            query.end_date
        );
        Ok(selected)
    }

    /// Only an unreachable listing is an error; everything else ends in an outcome.
    pub async fn run(&self, query: &RateQuery) -> Result<AnalysisOutcome> {
        let selected = self.select_files(query).await?;
        if selected.is_empty() {
            return Ok(AnalysisOutcome::NoFilesInRange {
                start_date: query.start_date,
                end_date: query.end_date,
            });
        }

        let files_requested = selected.len();
        let urls = selected.iter().map(|id| self.file_url(id)).collect();
        let report = self
            .extractor
            .extract_all(
                &self.fetcher,
                urls,
                &query.currency_code,
                self.concurrent_requests,
            )
            .await;

        if !report.failures.is_empty() {
            tracing::warn!(
                "{} of {} files could not be processed",
                report.failures.len(),
                files_requested
            );
        }

        if report.observations.is_empty() {
            return Ok(AnalysisOutcome::NoObservations {
                files_requested,
                failures: report.failures,
            });
        }

        tracing::info!(
            "Aggregating {} {} observations",
            report.observations.len(),
            query.currency_code
        );
        let summary = aggregate(&report.observations, &query.currency_code)?;

        Ok(AnalysisOutcome::Completed {
            summary,
            files_requested,
            observations: report.observations.len(),
            failures: report.failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RatesError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFetcher {
        listing: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Fetcher for CountingFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if url.ends_with("dir.aspx") {
                Ok(self.listing.as_bytes().to_vec())
            } else {
                Err(RatesError::HttpStatus {
                    url: url.to_string(),
                    status: 500,
                })
            }
        }
    }

    fn analysis(listing: &'static str, base_url: &str) -> RateAnalysis<CountingFetcher> {
        RateAnalysis::new(
            CountingFetcher {
                listing,
                calls: AtomicUsize::new(0),
            },
            CatalogScanner::default(),
            RateExtractor::default(),
            "http://localhost/dir.aspx",
            base_url,
            1,
        )
    }

    fn query(start: (i32, u32, u32), end: (i32, u32, u32)) -> RateQuery {
        RateQuery {
            currency_code: "USD".to_string(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_empty_range_never_fetches_files() {
        let analysis = analysis("c248z151228.xml 2015-12-28", "http://localhost/xml/");
        let outcome = analysis
            .run(&query((2016, 1, 4), (2016, 1, 8)))
            .await
            .unwrap();

        assert!(matches!(outcome, AnalysisOutcome::NoFilesInRange { .. }));
        assert_eq!(analysis.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_files_failing_reports_no_observations() {
        let analysis = analysis(
            "c248z151228.xml 2015-12-28 c249z151229.xml 2015-12-29",
            "http://localhost/xml/",
        );
        let outcome = analysis
            .run(&query((2015, 12, 28), (2016, 1, 1)))
            .await
            .unwrap();

        match outcome {
            AnalysisOutcome::NoObservations {
                files_requested,
                failures,
            } => {
                assert_eq!(files_requested, 2);
                assert_eq!(failures.len(), 2);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_file_url_joins_base() {
        let with_slash = analysis("", "http://www.nbp.pl/kursy/xml/");
        let without_slash = analysis("", "http://www.nbp.pl/kursy/xml");
        assert_eq!(
            with_slash.file_url("c001z160104.xml"),
            "http://www.nbp.pl/kursy/xml/c001z160104.xml"
        );
        assert_eq!(
            without_slash.file_url("c001z160104.xml"),
            "http://www.nbp.pl/kursy/xml/c001z160104.xml"
        );
    }
}
