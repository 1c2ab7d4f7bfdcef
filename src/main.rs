use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skycast::dashboard::COMMIT_KEY;
use skycast::{Coordinate, Dashboard, FixedPosition, Outcome, SkycastConfig, View, WeatherService, logging, web};

/// Weather dashboard for your location or any city
#[derive(Parser, Debug)]
#[command(name = "skycast", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the dashboard page (default)
    Serve {
        /// Port to listen on, overrides the config
        #[arg(long)]
        port: Option<u16>,
    },
    /// Render the dashboard for a city
    City {
        name: String,
        /// Write the HTML fragment here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render the dashboard for the configured or given position
    Locate {
        #[arg(long, requires = "longitude", allow_hyphen_values = true)]
        latitude: Option<f64>,
        #[arg(long, requires = "latitude", allow_hyphen_values = true)]
        longitude: Option<f64>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = SkycastConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    if cli.verbose {
        let source = cli.config.clone().or_else(SkycastConfig::get_config_path);
        tracing::debug!("Using config from: {:?}", source);
    }

    let service = WeatherService::new(&config.weather)?;

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            let mut server = config.server.clone();
            if let Some(port) = port {
                server.port = port;
            }
            web::run(&server, Arc::new(service)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::City { name, out } => {
            let dashboard = Dashboard::new(service);
            dashboard.set_input(name);
            let outcome = dashboard.on_key(COMMIT_KEY).await;
            if let Outcome::Prompted(message) = outcome {
                eprintln!("{message}");
                return Ok(ExitCode::FAILURE);
            }
            emit(&dashboard, out.as_ref())
        }
        Command::Locate {
            latitude,
            longitude,
            out,
        } => {
            let dashboard = Dashboard::new(service);
            let coordinate = match (latitude, longitude) {
                (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
                _ => config.location.coordinate(),
            };
            dashboard.on_load(&FixedPosition(coordinate)).await;
            emit(&dashboard, out.as_ref())
        }
    }
}

/// Print the rendered container; an error panel exits non-zero
fn emit(dashboard: &Dashboard, out: Option<&PathBuf>) -> Result<ExitCode> {
    let html = dashboard.view().render();
    match out {
        Some(path) => std::fs::write(path, &html)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{html}"),
    }

    Ok(match dashboard.view().snapshot() {
        View::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
