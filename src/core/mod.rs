pub mod aggregator;
pub mod analysis;
pub mod catalog;
pub mod extractor;
pub mod filter;

pub use crate::domain::model::{
    AnalysisOutcome, CatalogEntry, FileFailure, RateObservation, RatePair, RateQuery, RateSummary,
    TableLayout,
};
pub use crate::domain::ports::{ConfigProvider, Fetcher};
pub use crate::utils::error::Result;
