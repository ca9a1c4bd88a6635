//! Price formatting and day-over-day delta computation

/// Placeholder shown wherever a price or delta is missing or malformed.
pub const PLACEHOLDER: &str = "-";

/// Renders a price with exactly two fraction digits and thousands
/// grouping. Absent or non-finite values render as `"-"`.
pub fn format_price(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return PLACEHOLDER.to_string();
    };

    let raw = format!("{:.2}", v.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some(parts) => parts,
        None => (raw.as_str(), "00"),
    };
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Signed difference between two same-denomination prices. `None` when
/// either side is missing.
pub fn delta(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    Some(current? - previous?)
}

/// Renders a delta with an explicit `+` prefix for strictly positive
/// values; zero and negative values carry no extra prefix.
pub fn signed(delta: f64) -> String {
    let prefix = if delta > 0.0 { "+" } else { "" };
    format!("{prefix}{}", format_price(Some(delta)))
}

/// Direction classifier used for color and arrow rendering. Zero counts as
/// `Up`, unlike [`signed`] which leaves zero bare; call sites pick the
/// convention they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn from_delta(delta: f64) -> Self {
        if delta < 0.0 { Trend::Down } else { Trend::Up }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_two_fraction_digits_and_grouping() {
        assert_eq!(format_price(Some(0.0)), "0.00");
        assert_eq!(format_price(Some(5.0)), "5.00");
        assert_eq!(format_price(Some(312.456)), "312.46");
        assert_eq!(format_price(Some(1234.5)), "1,234.50");
        assert_eq!(format_price(Some(1_000_000.0)), "1,000,000.00");
        assert_eq!(format_price(Some(-1234.567)), "-1,234.57");
    }

    #[test]
    fn test_format_price_placeholder_for_missing_or_non_finite() {
        assert_eq!(format_price(None), "-");
        assert_eq!(format_price(Some(f64::NAN)), "-");
        assert_eq!(format_price(Some(f64::INFINITY)), "-");
        assert_eq!(format_price(Some(f64::NEG_INFINITY)), "-");
    }

    #[test]
    fn test_delta_requires_both_sides() {
        assert_eq!(delta(Some(100.0), Some(95.0)), Some(5.0));
        assert_eq!(delta(None, Some(95.0)), None);
        assert_eq!(delta(Some(100.0), None), None);
        assert_eq!(delta(None, None), None);
    }

    #[test]
    fn test_signed_prefixes_positive_only() {
        assert_eq!(signed(5.0), "+5.00");
        assert_eq!(signed(0.0), "0.00");
        assert_eq!(signed(-3.25), "-3.25");
        assert_eq!(signed(1250.0), "+1,250.00");
    }

    #[test]
    fn test_trend_counts_zero_as_up() {
        assert_eq!(Trend::from_delta(0.5), Trend::Up);
        assert_eq!(Trend::from_delta(0.0), Trend::Up);
        assert_eq!(Trend::from_delta(-0.5), Trend::Down);
        assert_eq!(Trend::Up.arrow(), "▲");
        assert_eq!(Trend::Down.arrow(), "▼");
    }
}
