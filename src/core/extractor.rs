use crate::domain::model::{FileFailure, RateObservation, TableLayout};
use crate::domain::ports::Fetcher;
use crate::utils::error::{RatesError, Result};
use futures::stream::{self, StreamExt};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Observations and failures gathered from a batch of daily tables.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    pub observations: Vec<RateObservation>,
    pub failures: Vec<FileFailure>,
}

/// Pulls one currency's rates out of the daily table documents.
#[derive(Debug, Clone, Default)]
pub struct RateExtractor {
    layout: TableLayout,
}

impl RateExtractor {
    pub fn new(layout: TableLayout) -> Self {
        Self { layout }
    }

    /// Fetches and parses a single table. Any failure is returned to the caller.
    pub async fn try_extract<F: Fetcher + ?Sized>(
        &self,
        fetcher: &F,
        file_url: &str,
        currency_code: &str,
    ) -> Result<Vec<RateObservation>> {
        tracing::debug!("Requesting file {}", file_url);
        let body = fetcher
            .fetch(file_url)
            .await
            .map_err(|e| RatesError::FileFetchFailed {
                url: file_url.to_string(),
                reason: e.to_string(),
            })?;

        let xml = decode_latin1(&body);
        parse_rate_table(&xml, currency_code, &self.layout)
    }

    /// Like [`try_extract`](Self::try_extract), but a failed file only logs a
    /// warning and contributes nothing.
    pub async fn extract<F: Fetcher + ?Sized>(
        &self,
        fetcher: &F,
        file_url: &str,
        currency_code: &str,
    ) -> Vec<RateObservation> {
        match self.try_extract(fetcher, file_url, currency_code).await {
            Ok(observations) => observations,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", file_url, e);
                Vec::new()
            }
        }
    }

    /// Processes every file with at most `concurrency` requests in flight.
    pub async fn extract_all<F: Fetcher + ?Sized>(
        &self,
        fetcher: &F,
        file_urls: Vec<String>,
        currency_code: &str,
        concurrency: usize,
    ) -> ExtractionReport {
        let results: Vec<(String, Result<Vec<RateObservation>>)> = stream::iter(file_urls)
            .map(|url| async move {
                let result = self.try_extract(fetcher, &url, currency_code).await;
                (url, result)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        results
            .into_iter()
            .fold(ExtractionReport::default(), |mut report, (url, result)| {
                match result {
                    Ok(observations) => report.observations.extend(observations),
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", url, e);
                        report.failures.push(FileFailure {
                            url,
                            reason: e.to_string(),
                        });
                    }
                }
                report
            })
    }
}

/// The tables are ISO-8859-1 whatever their declaration says; every byte maps to
/// the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parses a rate written with either a decimal comma or a decimal point.
///
/// Exchange rates are strictly positive; zero or negative values are rejected.
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

#[derive(Debug, Default)]
struct PendingRecord {
    currency_code: Option<String>,
    buying_rate: Option<String>,
    selling_rate: Option<String>,
}

impl PendingRecord {
    fn set(&mut self, field: &str, value: String, layout: &TableLayout) {
        if field == layout.currency_code {
            self.currency_code = Some(value);
        } else if field == layout.buying_rate {
            self.buying_rate = Some(value);
        } else if field == layout.selling_rate {
            self.selling_rate = Some(value);
        }
    }

    fn into_observation(self, currency_code: &str) -> Option<RateObservation> {
        let Some(code) = self.currency_code else {
            tracing::debug!("Skipping position without a currency code");
            return None;
        };
        if code != currency_code {
            return None;
        }

        let buy_value = self.buying_rate.as_deref().and_then(parse_decimal);
        let sell_value = self.selling_rate.as_deref().and_then(parse_decimal);
        match (buy_value, sell_value) {
            (Some(buy_value), Some(sell_value)) => Some(RateObservation {
                currency_code: code,
                buy_value,
                sell_value,
            }),
            _ => {
                tracing::debug!(
                    "Skipping {} position with unreadable rates: buy={:?}, sell={:?}",
                    code,
                    self.buying_rate,
                    self.selling_rate
                );
                None
            }
        }
    }
}

/// Extracts the positions for `currency_code` from a decoded table document.
///
/// Only record elements directly under the root element are read. The code match
/// is exact and case-sensitive.
pub fn parse_rate_table(
    xml: &str,
    currency_code: &str,
    layout: &TableLayout,
) -> Result<Vec<RateObservation>> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut pending: Option<PendingRecord> = None;
    let mut positions = 0usize;
    let mut observations = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                text.clear();
                if path.len() == 2 && path[0] == layout.root && path[1] == layout.record {
                    pending = Some(PendingRecord::default());
                }
            }
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::End(_) => {
                if path.len() == 3 {
                    if let Some(record) = pending.as_mut() {
                        record.set(&path[2], text.trim().to_string(), layout);
                    }
                } else if path.len() == 2 {
                    if let Some(record) = pending.take() {
                        positions += 1;
                        if let Some(observation) = record.into_observation(currency_code) {
                            tracing::debug!(
                                "Created rate buy={}, sell={}, code={}",
                                observation.buy_value,
                                observation.sell_value,
                                observation.currency_code
                            );
                            observations.push(observation);
                        }
                    }
                }
                path.pop();
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !path.is_empty() {
        return Err(RatesError::InvalidDocument {
            message: format!("unexpected end of document inside <{}>", path.join("/")),
        });
    }
    if positions == 0 {
        tracing::debug!("No positions were found");
    }

    Ok(observations)
}
