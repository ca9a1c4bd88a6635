//! Widget assembly and the mount entry point

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use futures::future;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, error};

use crate::core::error::WidgetError;
use crate::core::history;
use crate::core::record::{Denomination, RateEntry};
use crate::core::{Trend, delta};
use crate::render;
use crate::source::{self, RateSource};

/// Everything the renderer needs for one denomination column.
#[derive(Debug, Clone)]
pub struct PanelData {
    pub denomination: Denomination,
    pub price: Option<f64>,
    pub delta: Option<f64>,
}

impl PanelData {
    pub fn trend(&self) -> Option<Trend> {
        self.delta.map(Trend::from_delta)
    }
}

/// A fully computed render cycle: date label plus one panel per
/// denomination. Discarded after rendering.
#[derive(Debug, Clone)]
pub struct WidgetSnapshot {
    pub date_label: String,
    pub panels: Vec<PanelData>,
}

/// Derives the panels from today's entry and the previous day, if any.
/// A delta is only present when both sides carry a usable price.
pub fn build_snapshot(
    date_label: &str,
    today: &RateEntry,
    previous: Option<&RateEntry>,
) -> WidgetSnapshot {
    let panels = Denomination::ALL
        .iter()
        .map(|&denomination| {
            let price = today.price(denomination);
            let delta =
                previous.and_then(|prev| delta::delta(price, prev.price(denomination)));
            PanelData {
                denomination,
                price,
                delta,
            }
        })
        .collect();

    WidgetSnapshot {
        date_label: date_label.to_string(),
        panels,
    }
}

#[derive(Debug, Clone, Default)]
pub struct MountOptions {
    /// Dual-source mode: fetch today's prices from the date-named daily
    /// document instead of the history head.
    pub use_daily: bool,
    /// Overrides "today" for the daily document and the error panel;
    /// defaults to the current UTC date.
    pub today: Option<NaiveDate>,
}

impl MountOptions {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Where the rendered widget goes.
#[derive(Debug, Clone)]
pub enum RenderTarget {
    Stdout,
    File(PathBuf),
}

impl RenderTarget {
    /// Resolves the target into a writer. Unlike data errors, an
    /// unresolvable target is fatal to the mount call.
    fn resolve(&self) -> Result<Box<dyn Write>, WidgetError> {
        match self {
            RenderTarget::Stdout => Ok(Box::new(std::io::stdout())),
            RenderTarget::File(path) => {
                let file = File::create(path).map_err(|err| {
                    WidgetError::TargetNotFound(format!("{}: {err}", path.display()))
                })?;
                Ok(Box::new(file))
            }
        }
    }
}

async fn assemble(
    source: &dyn RateSource,
    options: &MountOptions,
) -> Result<WidgetSnapshot, WidgetError> {
    if options.use_daily {
        let today = options.today();
        // Both fetches run concurrently and fail independently; a missing
        // daily document must not block the history, and vice versa.
        let (daily, history_doc) = future::join(
            source::fetch_or_empty(source.fetch_daily(today)),
            source::fetch_or_empty(source.fetch_history()),
        )
        .await;

        let previous = history::normalize(&history_doc)
            .ok()
            .and_then(|records| records.into_iter().find(|r| r.date < today))
            .map(|r| r.rates);
        debug!(?today, previous_found = previous.is_some(), "Assembled dual-source snapshot");

        let date_label = today.format("%Y-%m-%d").to_string();
        Ok(build_snapshot(&date_label, &daily, previous.as_ref()))
    } else {
        let history_doc = source.fetch_history().await?;
        let mut records = history::normalize(&history_doc)?.into_iter();
        let today = records.next().ok_or(WidgetError::NoData)?;
        let previous = records.next();

        Ok(build_snapshot(
            &today.label,
            &today.rates,
            previous.as_ref().map(|r| &r.rates),
        ))
    }
}

/// Mounts the widget onto a render target.
///
/// Target resolution failures surface immediately. Any error during data
/// retrieval or normalization is caught here, logged, and rendered as an
/// in-place error panel; the target is never left blank.
pub async fn mount(
    target: &RenderTarget,
    source: &dyn RateSource,
    options: &MountOptions,
) -> Result<()> {
    let mut out = target.resolve()?;

    match assemble(source, options).await {
        Ok(snapshot) => writeln!(out, "{}", render::widget_text(&snapshot))?,
        Err(err) => {
            error!("Widget data load failed: {err}");
            let date_label = options.today().format("%Y-%m-%d").to_string();
            writeln!(out, "{}", render::error_panel_text(&date_label, &err))?;
        }
    }
    Ok(())
}
