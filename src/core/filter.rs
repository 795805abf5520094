use crate::domain::model::CatalogEntry;
use chrono::NaiveDate;

/// Keeps the identifiers dated within `[start, end]`, both ends inclusive.
///
/// Listing order is preserved. A reversed range selects nothing.
pub fn filter_entries(entries: Vec<CatalogEntry>, start: NaiveDate, end: NaiveDate) -> Vec<String> {
    entries
        .into_iter()
        .filter(|entry| start <= entry.date && entry.date <= end)
        .map(|entry| entry.identifier)
        .collect()
}
