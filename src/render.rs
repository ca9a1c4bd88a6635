//! Terminal rendering for the widget, error panel, and history table

use comfy_table::{Cell, CellAlignment, Color};
use console::style;

use crate::core::error::WidgetError;
use crate::core::record::{Denomination, PriceRecord};
use crate::core::{Trend, delta};
use crate::ui;
use crate::widget::WidgetSnapshot;

/// The date badge shown above every panel.
fn badge(date_label: &str) -> String {
    format!(
        "{} {}",
        style("●").green(),
        ui::style_text(date_label, ui::StyleType::Badge)
    )
}

/// Renders the widget: date badge on top, one column per denomination
/// with the current price and the day-over-day delta.
pub fn widget_text(snapshot: &WidgetSnapshot) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(
        snapshot
            .panels
            .iter()
            .map(|panel| ui::header_cell(&panel.denomination.to_string()))
            .collect::<Vec<_>>(),
    );
    table.add_row(
        snapshot
            .panels
            .iter()
            .map(|panel| ui::price_cell(panel.price))
            .collect::<Vec<_>>(),
    );
    table.add_row(
        snapshot
            .panels
            .iter()
            .map(|panel| match panel.delta {
                Some(delta) => ui::delta_cell(delta),
                None => ui::no_delta_cell(),
            })
            .collect::<Vec<_>>(),
    );

    format!("{}\n\n{table}", badge(&snapshot.date_label))
}

/// Renders the in-place error state: the widget never leaves its target
/// blank, so failures show today's date and a description instead.
pub fn error_panel_text(date_label: &str, error: &WidgetError) -> String {
    format!(
        "{}\n\n{}\n  {}",
        badge(date_label),
        ui::style_text("Unable to load data", ui::StyleType::Title),
        ui::style_text(&error.to_string(), ui::StyleType::Error),
    )
}

/// Renders the full rate history, newest first, with a trend arrow
/// against the previous available day.
pub fn history_table_text(records: &[PriceRecord]) -> String {
    let mut table = ui::new_styled_table();

    let mut header = vec![ui::header_cell("Date")];
    for denomination in Denomination::ALL {
        header.push(ui::header_cell(&denomination.to_string()));
    }
    table.set_header(header);

    for (i, record) in records.iter().enumerate() {
        let previous = records.get(i + 1);
        let mut row = vec![Cell::new(&record.label)];

        for denomination in Denomination::ALL {
            let price = record.price(denomination);
            let change = previous.and_then(|prev| delta::delta(price, prev.price(denomination)));

            let cell = match (price, change) {
                (Some(_), Some(change)) => {
                    let trend = Trend::from_delta(change);
                    let color = match trend {
                        Trend::Up => Color::Green,
                        Trend::Down => Color::Red,
                    };
                    Cell::new(format!("{} {}", delta::format_price(price), trend.arrow()))
                        .fg(color)
                        .set_alignment(CellAlignment::Right)
                }
                _ => ui::price_cell(price),
            };
            row.push(cell);
        }
        table.add_row(row);
    }

    table.to_string()
}
