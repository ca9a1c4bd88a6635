use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use karat::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for karat::AppCommand {
    fn from(cmd: Commands) -> karat::AppCommand {
        match cmd {
            Commands::Show {
                output,
                history_url,
            } => karat::AppCommand::Show {
                output,
                history_url,
            },
            Commands::History { limit } => karat::AppCommand::History { limit },
            Commands::Update => karat::AppCommand::Update,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display today's gold rates with day-over-day changes
    Show {
        /// Write the rendered widget to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the history document location (path or absolute URL)
        #[arg(long)]
        history_url: Option<String>,
    },
    /// Display the full rate history table
    History {
        /// Maximum number of days to display
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Fetch today's rates and update the local archive
    Update,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => karat::cli::setup::setup(),
        Some(cmd) => karat::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
