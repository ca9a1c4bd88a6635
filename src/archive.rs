//! On-disk rate archive: date-named daily documents plus a rolling
//! history.json trimmed to the most recent days

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core::record::{Denomination, HistoryDocument, PriceField, RateEntry};

pub const HISTORY_FILE: &str = "history.json";

/// Converts an upstream rate label to its snake_case document key,
/// dropping the standalone word "rate": `"Gold 24KT Rate"` -> `"gold_24kt"`.
pub fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty() && *token != "rate")
        .collect::<Vec<_>>()
        .join("_")
}

/// Strips the currency token and surrounding whitespace from an upstream
/// value: `"3,584.50 AED"` -> `"3,584.50"`.
pub fn clean_value(value: &str) -> String {
    let mut cleaned = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.to_ascii_lowercase().find("aed") {
        cleaned.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
    }
    cleaned.push_str(rest);
    cleaned.trim().to_string()
}

/// Maps an upstream document of label -> value onto a rate entry. Labels
/// that normalize to an unknown key are ignored.
pub fn entry_from_upstream(raw: &BTreeMap<String, Value>) -> RateEntry {
    let mut entry = RateEntry::default();

    for (label, value) in raw {
        let key = normalize_label(label);
        let Some(denomination) = Denomination::ALL
            .into_iter()
            .find(|d| d.field_name() == key)
        else {
            continue;
        };

        match value {
            Value::Number(n) => {
                if let Some(n) = n.as_f64() {
                    entry.set(denomination, PriceField::Number(n));
                }
            }
            Value::String(s) => {
                entry.set(denomination, PriceField::Text(clean_value(s)));
            }
            other => warn!("Ignoring non-scalar rate value for {label:?}: {other}"),
        }
    }

    entry
}

/// Writes the day's rates to `<dir>/YYYY-MM-DD.json`.
pub fn save_daily(dir: &Path, date: NaiveDate, entry: &RateEntry) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create archive directory: {}", dir.display()))?;

    let path = dir.join(format!("{}.json", date.format("%Y-%m-%d")));
    let body = serde_json::to_string_pretty(entry)?;
    fs::write(&path, body)
        .with_context(|| format!("Failed to write daily document to {}", path.display()))?;

    info!("Saved rates to {}", path.display());
    Ok(())
}

/// Merges the day into `<dir>/history.json`, replacing any existing entry
/// for the same date and keeping only the `limit` most recent days. A
/// missing or invalid existing file starts a fresh history.
pub fn update_history(dir: &Path, date: NaiveDate, entry: &RateEntry, limit: usize) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create archive directory: {}", dir.display()))?;
    let path = dir.join(HISTORY_FILE);

    let mut history: HistoryDocument = match fs::read_to_string(&path) {
        Ok(existing) => serde_json::from_str(&existing).unwrap_or_else(|err| {
            warn!("Discarding invalid history at {}: {err}", path.display());
            HistoryDocument::new()
        }),
        Err(_) => HistoryDocument::new(),
    };

    history.insert(date.format("%Y-%m-%d").to_string(), entry.clone());

    // ISO keys sort chronologically, so the first key is the oldest day.
    while history.len() > limit {
        history.pop_first();
    }

    let body = serde_json::to_string_pretty(&history)?;
    fs::write(&path, body)
        .with_context(|| format!("Failed to write history to {}", path.display()))?;

    info!(
        "Updated history at {} ({} days kept)",
        path.display(),
        history.len()
    );
    Ok(())
}
