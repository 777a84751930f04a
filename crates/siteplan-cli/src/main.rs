use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use siteplan_infrastructure::ConfigService;
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "siteplan")]
#[command(about = "Siteplan CLI - battery storage site layouts and saved configurations", long_about = None)]
struct Cli {
    /// Session document to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    data_file: Option<PathBuf>,

    /// Config file [default: <config dir>/siteplan/config.toml]
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the layout for a configuration request
    Calculate {
        /// Request JSON file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Save a configuration request as a session
    Save {
        /// Request JSON file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// List saved sessions, most recent first
    List,
    /// Print the configuration of a saved session
    Load { id: String },
    /// Delete a saved session
    Delete { id: String },
    /// Compute the layout of a saved session
    Layout { id: String },
    /// List the device catalogue
    Devices,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::new(path),
        None => ConfigService::default_location()?,
    };
    let config = config_service
        .get_config()
        .context("Failed to load configuration")?;
    logging::init(&config.logging.filter);

    let sessions_file = config_service.sessions_file(cli.data_file)?;
    tracing::debug!(path = ?sessions_file, "Using session store");
    let app = commands::App::new(sessions_file);

    match cli.command {
        Commands::Calculate { input } => {
            commands::print_json(&commands::layout::calculate(&app, input.as_deref())?)?
        }
        Commands::Save { input } => {
            commands::print_json(&commands::session::save(&app, input.as_deref()).await?)?
        }
        Commands::List => commands::print_json(&commands::session::list(&app).await?)?,
        Commands::Load { id } => commands::print_json(&commands::session::load(&app, &id).await?)?,
        Commands::Delete { id } => commands::session::delete(&app, &id).await?,
        Commands::Layout { id } => {
            commands::print_json(&commands::layout::for_session(&app, &id).await?)?
        }
        Commands::Devices => commands::print_json(&commands::devices::list())?,
    }

    Ok(())
}
