//! Core data types for daily gold rates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// The three gold purity gradations tracked by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denomination {
    TwentyFourKt,
    TwentyTwoKt,
    EighteenKt,
}

impl Denomination {
    /// Display order: highest purity first.
    pub const ALL: [Denomination; 3] = [
        Denomination::TwentyFourKt,
        Denomination::TwentyTwoKt,
        Denomination::EighteenKt,
    ];

    /// The field this denomination maps to in rate documents.
    pub fn field_name(&self) -> &'static str {
        match self {
            Denomination::TwentyFourKt => "gold_24kt",
            Denomination::TwentyTwoKt => "gold_22kt",
            Denomination::EighteenKt => "gold_18kt",
        }
    }
}

impl Display for Denomination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Denomination::TwentyFourKt => "24K",
                Denomination::TwentyTwoKt => "22K",
                Denomination::EighteenKt => "18K",
            }
        )
    }
}

/// A price as it appears in upstream documents: either a JSON number or a
/// numeric string such as `"3,584.50"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Number(f64),
    Text(String),
}

impl PriceField {
    /// Parses the field into a finite number, tolerating grouping commas
    /// and surrounding whitespace. Returns `None` for anything else.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            PriceField::Number(n) => Some(*n),
            PriceField::Text(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

/// One day's raw prices. Every field may be absent in malformed documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold_24kt: Option<PriceField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold_22kt: Option<PriceField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold_18kt: Option<PriceField>,
}

impl RateEntry {
    pub fn price(&self, denomination: Denomination) -> Option<f64> {
        let field = match denomination {
            Denomination::TwentyFourKt => &self.gold_24kt,
            Denomination::TwentyTwoKt => &self.gold_22kt,
            Denomination::EighteenKt => &self.gold_18kt,
        };
        field.as_ref().and_then(PriceField::as_f64)
    }

    pub fn set(&mut self, denomination: Denomination, value: PriceField) {
        let field = match denomination {
            Denomination::TwentyFourKt => &mut self.gold_24kt,
            Denomination::TwentyTwoKt => &mut self.gold_22kt,
            Denomination::EighteenKt => &mut self.gold_18kt,
        };
        *field = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        self.gold_24kt.is_none() && self.gold_22kt.is_none() && self.gold_18kt.is_none()
    }
}

/// The externally supplied history document: date string to rate entry.
/// Keys are unique by construction; order carries no meaning.
pub type HistoryDocument = BTreeMap<String, RateEntry>;

/// A rate entry paired with its parsed date. Built once per render cycle
/// and never mutated.
#[derive(Debug, Clone)]
pub struct PriceRecord {
    pub date: NaiveDate,
    /// Original document key, kept for display and tie-breaking.
    pub label: String,
    pub rates: RateEntry,
}

impl PriceRecord {
    pub fn price(&self, denomination: Denomination) -> Option<f64> {
        self.rates.price(denomination)
    }
}
