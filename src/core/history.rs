//! History normalization: date-keyed documents to ordered records

use crate::core::error::WidgetError;
use crate::core::record::{HistoryDocument, PriceRecord};
use chrono::NaiveDate;
use tracing::warn;

/// Converts a history document into records sorted by date descending, so
/// the first element is the latest day and the second the previous one.
///
/// Keys that do not parse as `YYYY-MM-DD` are skipped. Distinct keys that
/// parse to the same date are ordered by raw key descending, so the result
/// is deterministic for any input.
pub fn normalize(history: &HistoryDocument) -> Result<Vec<PriceRecord>, WidgetError> {
    let mut records: Vec<PriceRecord> = history
        .iter()
        .filter_map(|(key, entry)| match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
            Ok(date) => Some(PriceRecord {
                date,
                label: key.clone(),
                rates: entry.clone(),
            }),
            Err(err) => {
                warn!("Skipping history entry with unparseable date {key:?}: {err}");
                None
            }
        })
        .collect();

    records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.label.cmp(&a.label)));

    if records.is_empty() {
        return Err(WidgetError::NoData);
    }
    Ok(records)
}
