//! Core business logic: data model, normalization, deltas

pub mod delta;
pub mod error;
pub mod history;
pub mod record;

// Re-export main types for cleaner imports
pub use delta::Trend;
pub use error::WidgetError;
pub use record::{Denomination, HistoryDocument, PriceField, PriceRecord, RateEntry};
