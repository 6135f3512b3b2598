//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Runway - Explain financial sandbox simulations
#[derive(Parser)]
#[command(name = "runway")]
#[command(about = "Commentary, reports and onboarding for financial sandbox simulations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the data dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a financial snapshot
    Insight {
        /// Snapshot JSON file produced by the simulation
        #[arg(short, long)]
        file: PathBuf,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,

        /// Exit with an error when the status is at least this severe
        /// (neutral, success, warning, critical)
        #[arg(long, value_name = "STATUS")]
        fail_on: Option<String>,
    },

    /// Show a saved blueprint
    Blueprint {
        /// Blueprint JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Append the analysis of the blueprint's results
        #[arg(long)]
        insight: bool,
    },

    /// Browse a directory of saved blueprints
    Blueprints {
        /// Directory containing blueprint JSON files
        #[arg(short, long)]
        dir: PathBuf,

        /// Keys to replay instead of reading stdin (e.g. "1,b,2,q")
        ///
        /// In the list: a number opens that blueprint, q quits.
        /// In a blueprint: b goes back to the list, q quits.
        #[arg(long)]
        script: Option<String>,
    },

    /// Walk through the onboarding tour
    Tour {
        /// Keys to replay instead of reading stdin (e.g. "n,n,b,s")
        ///
        /// n = next, b = back, s = skip, o = reopen, q = quit
        #[arg(long)]
        script: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the override file location
    Path,
}
