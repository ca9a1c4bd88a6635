use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::Trend;
use crate::core::delta::{self, PLACEHOLDER};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Badge,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Badge => style(text).bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an optional price into a cell. Missing prices render the
/// placeholder, dimmed.
pub fn price_cell(price: Option<f64>) -> Cell {
    match price {
        Some(_) => Cell::new(delta::format_price(price)).set_alignment(CellAlignment::Right),
        None => Cell::new(PLACEHOLDER)
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
    }
}

/// Creates a cell for a day-over-day delta: trend arrow plus signed
/// amount, colored by direction.
pub fn delta_cell(delta: f64) -> Cell {
    let trend = Trend::from_delta(delta);
    let text = format!("{} {}", trend.arrow(), delta::signed(delta));
    let color = match trend {
        Trend::Up => Color::Green,
        Trend::Down => Color::Red,
    };
    Cell::new(text).fg(color).set_alignment(CellAlignment::Right)
}

/// Creates a placeholder cell for an unavailable delta.
pub fn no_delta_cell() -> Cell {
    Cell::new(PLACEHOLDER)
        .fg(Color::DarkGrey)
        .set_alignment(CellAlignment::Right)
}

/// Creates a new `indicatif` spinner with standard styling.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
