use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod config;
mod models;
mod services;
mod utils;

use cli::CliArgs;
use config::AppConfig;
use services::{feed_service, plot_service, render_service};
use utils::NeoError;

/// Fetch, map and render one day of close approaches
async fn run(config: &AppConfig) -> Result<PathBuf, NeoError> {
    let client = config.client()?;
    let (today, records) = feed_service::fetch_today(&client, config.time_scale).await?;

    match feed_service::summarize(&records) {
        Some(summary) => {
            info!("{} near-Earth objects pass Earth on {}", summary.count, today);
            info!(
                "Closest: {} at {:.0} miles; largest: {} at {:.2} miles wide",
                summary.closest_name, summary.closest_miles, summary.largest_name, summary.largest_miles
            );
        }
        None => warn!("No near-Earth objects reported for {}", today),
    }

    let plot = plot_service::build_plot_points(&records, today);
    render_service::render_to_file(&plot, &config.output, config.width, config.height)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = CliArgs::parse();

    // Initialize tracing
    let level = if args.verbose { "neo_today=debug" } else { "neo_today=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{},reqwest=warn", level))),
        )
        .with_target(true)
        .init();

    let config = match AppConfig::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("☄️  neo-today starting, writing to {}", config.output.display());

    let path = match run(&config).await {
        Ok(p) => p,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.open {
        if let Err(e) = render_service::open_in_browser(&path) {
            warn!("{}", e);
        }
    }

    ExitCode::SUCCESS
}
