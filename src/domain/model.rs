use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One data file named in the listing, paired with its publication date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub identifier: String,
    pub date: NaiveDate,
}

/// Buy/sell rates for one currency from one daily table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateObservation {
    pub currency_code: String,
    pub buy_value: f64,
    pub sell_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatePair {
    pub buy: f64,
    pub sell: f64,
}

impl RatePair {
    pub fn new(buy: f64, sell: f64) -> Self {
        Self { buy, sell }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSummary {
    pub currency_code: String,
    pub average: RatePair,
    pub deviation: RatePair,
    pub maximum: RatePair,
    pub minimum: RatePair,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuery {
    pub currency_code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    NoFilesInRange {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    NoObservations {
        files_requested: usize,
        failures: Vec<FileFailure>,
    },
    Completed {
        summary: RateSummary,
        files_requested: usize,
        observations: usize,
        failures: Vec<FileFailure>,
    },
}

/// Element names of the daily table document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    pub root: String,
    pub record: String,
    pub currency_code: String,
    pub buying_rate: String,
    pub selling_rate: String,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            root: "tabela_kursow".to_string(),
            record: "pozycja".to_string(),
            currency_code: "kod_waluty".to_string(),
            buying_rate: "kurs_kupna".to_string(),
            selling_rate: "kurs_sprzedazy".to_string(),
        }
    }
}
