use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::archive;
use crate::config::AppConfig;
use crate::source;
use crate::ui;

/// Fetches today's rates from the configured upstream document and folds
/// them into the local archive: a date-named daily file plus the rolling
/// history.
pub async fn run(config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    let upstream_url = config
        .sources
        .upstream_url
        .as_deref()
        .context("No upstream configured; set sources.upstream_url to enable update")?;

    let spinner = ui::new_spinner("Fetching today's rates...");
    let result = source::fetch_json::<BTreeMap<String, Value>>(upstream_url).await;
    spinner.finish_and_clear();

    let raw = result.with_context(|| format!("Failed to fetch rates from {upstream_url}"))?;
    debug!("Upstream document carries {} labels", raw.len());

    let entry = archive::entry_from_upstream(&raw);
    if entry.is_empty() {
        bail!("No gold rates found in the upstream document at {upstream_url}");
    }

    let today = Utc::now().date_naive();
    archive::save_daily(&config.archive_dir, today, &entry)?;
    archive::update_history(&config.archive_dir, today, &entry, config.history_limit)?;

    println!(
        "Updated {} for {}",
        config.archive_dir.display(),
        today.format("%Y-%m-%d")
    );
    Ok(())
}
