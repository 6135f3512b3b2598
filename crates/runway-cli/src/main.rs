//! Runway CLI - Financial sandbox explainer
//!
//! Usage:
//!   runway insight --file snapshot.json     Analyze a simulation snapshot
//!   runway blueprint --file blueprint.json  Show a saved blueprint
//!   runway blueprints --dir saved/          Browse saved blueprints
//!   runway tour                             Walk through onboarding

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use runway_core::RunwayConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config =
        RunwayConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Insight {
            file,
            json,
            fail_on,
        } => commands::cmd_insight(&config, &file, json, fail_on.as_deref()),
        Commands::Blueprint {
            file,
            json,
            insight,
        } => commands::cmd_blueprint(&config, &file, json, insight),
        Commands::Blueprints { dir, script } => {
            let mut keys = commands::key_source(script.as_deref());
            commands::cmd_blueprints(&config, &dir, &mut keys, &mut std::io::stdout())
        }
        Commands::Tour { script } => {
            let keys = commands::key_source(script.as_deref());
            commands::cmd_tour(&config, keys, &mut std::io::stdout()).await
        }
        Commands::Config { action } => match action {
            None | Some(ConfigAction::Show) => commands::cmd_config_show(&config),
            Some(ConfigAction::Path) => commands::cmd_config_path(cli.config.as_deref()),
        },
    }
}
