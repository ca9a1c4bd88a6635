use anyhow::Result;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::source::HttpRateSource;
use crate::widget::{self, MountOptions, RenderTarget};

/// Resolves the history location: CLI flag over config over built-in
/// default.
fn resolve_history_path<'a>(flag: Option<&'a str>, config: &'a AppConfig) -> &'a str {
    flag.unwrap_or(&config.sources.history_path)
}

pub async fn run(
    config_path: Option<&str>,
    output: Option<PathBuf>,
    history_url: Option<&str>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    let history_path = resolve_history_path(history_url, &config);
    let source = HttpRateSource::with_paths(
        &config.sources.base_url,
        history_path,
        config.sources.daily_path_or_default(),
    );

    let target = match output {
        Some(path) => RenderTarget::File(path),
        None => RenderTarget::Stdout,
    };
    let options = MountOptions {
        use_daily: config.sources.daily_path.is_some(),
        today: None,
    };

    widget::mount(&target, &source, &options).await
}
