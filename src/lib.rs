pub mod archive;
pub mod cli;
pub mod config;
pub mod core;
pub mod log;
pub mod render;
pub mod source;
pub mod ui;
pub mod widget;

use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum AppCommand {
    Show {
        output: Option<PathBuf>,
        history_url: Option<String>,
    },
    History {
        limit: Option<usize>,
    },
    Update,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    match command {
        AppCommand::Show {
            output,
            history_url,
        } => cli::show::run(config_path, output, history_url.as_deref()).await,
        AppCommand::History { limit } => cli::history::run(config_path, limit).await,
        AppCommand::Update => cli::update::run(config_path).await,
    }
}
