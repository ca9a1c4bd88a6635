use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::core::history;
use crate::render;
use crate::source::{HttpRateSource, RateSource};
use crate::ui;

pub async fn run(config_path: Option<&str>, limit: Option<usize>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    let source = HttpRateSource::with_paths(
        &config.sources.base_url,
        &config.sources.history_path,
        config.sources.daily_path_or_default(),
    );

    let spinner = ui::new_spinner("Fetching rate history...");
    let result = source.fetch_history().await;
    spinner.finish_and_clear();

    let history_doc = result.context("Failed to load the rate history")?;
    let mut records = history::normalize(&history_doc)?;
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    println!(
        "{}\n",
        ui::style_text("Gold rate history", ui::StyleType::Title)
    );
    println!("{}", render::history_table_text(&records));

    Ok(())
}
