use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use tracing::info;
use weatherview_core::{
    Config, WeatherApiClient, WeatherView, client_from_config, view::ConditionsCard,
};

use crate::{configure, logging, tui};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherview", version, about = "Current weather for a place, in your terminal")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "weatherview_core=trace". Defaults to RUST_LOG, then "warn".
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the startup place.
    Configure,

    /// Print current conditions for a place and exit.
    Show {
        /// Place name, e.g. "Bucharest" or "Paris,FR".
        place: String,
    },

    /// Open the interactive view (default).
    Run {
        /// Place to look up on startup instead of the configured default.
        #[arg(long)]
        place: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Run { place: None });

        let target = match command {
            Command::Run { .. } => logging::LogTarget::File(Config::log_file_path()?),
            _ => logging::LogTarget::Stderr,
        };
        logging::init(self.log_level.as_deref(), &target)?;

        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match command {
            Command::Configure => {
                let config = Config::load_from(&config_path)?;
                let updated = configure::prompt(config)?;
                updated.save_to(&config_path)?;
                println!("Saved configuration to {}", config_path.display());
            }
            Command::Show { place } => {
                let config = load_config(&config_path)?;
                let client = client_from_config(&config)?;
                let snapshot = client
                    .fetch_current_conditions(&place)
                    .await
                    .map_err(|e| anyhow!(e.message()))
                    .with_context(|| format!("Could not look up weather for '{place}'"))?;
                let today = chrono::Utc::now().date_naive();
                println!("{}", ConditionsCard::from_snapshot(&snapshot, today));
            }
            Command::Run { place } => {
                let mut config = load_config(&config_path)?;
                if let Some(place) = place.filter(|p| !p.trim().is_empty()) {
                    config.default_place = place;
                }
                let client = client_from_config(&config)?;
                info!(place = %config.default_place, "starting interactive view");
                tui::run(WeatherView::new(client, &config)).await?;
            }
        }

        Ok(())
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    Ok(Config::load_from(path)?.with_env_overrides())
}
