//! Configuration for thresholds, tour steps and display options
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/runway/config/runway.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Override files may be partial; anything they leave out keeps the embedded
//! value.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::insights::InsightThresholds;
use crate::tour::TourStep;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/runway.toml");

/// Formatting options for rendered reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    /// chrono format string used for long-form dates
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: "%B %-d, %Y".to_string(),
        }
    }
}

/// Guided tour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourConfig {
    /// Delay before the tour rewinds after closing
    pub reset_delay_ms: u64,
    pub steps: Vec<TourStep>,
}

impl TourConfig {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayConfig {
    pub insights: InsightThresholds,
    pub display: DisplayOptions,
    pub tour: TourConfig,
}

impl RunwayConfig {
    /// Configuration compiled into the binary
    pub fn embedded() -> Result<Self> {
        let base = RunwayConfig {
            insights: InsightThresholds::default(),
            display: DisplayOptions::default(),
            tour: TourConfig {
                reset_delay_ms: 300,
                steps: vec![],
            },
        };
        apply_overrides(base, DEFAULT_CONFIG)
    }

    /// Load configuration (explicit path or data dir override, then defaults)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let base = Self::embedded()?;

        let path = match override_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        match path {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Loading config override");
                let content = fs::read_to_string(&path)
                    .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
                apply_overrides(base, &content)
            }
            Some(path) if override_path.is_some() => Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            ))),
            _ => Ok(base),
        }
    }

    /// Parse a config document on top of the embedded defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        apply_overrides(Self::embedded()?, content)
    }

    /// Render as TOML (for `runway config show`)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("runway").join("config").join("runway.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    insights: Option<InsightThresholds>,
    display: Option<RawDisplay>,
    tour: Option<RawTour>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency_symbol: Option<String>,
    date_format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTour {
    reset_delay_ms: Option<u64>,
    steps: Option<Vec<TourStep>>,
}

fn apply_overrides(mut config: RunwayConfig, content: &str) -> Result<RunwayConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    if let Some(insights) = raw.insights {
        config.insights = insights;
    }

    if let Some(display) = raw.display {
        if let Some(symbol) = display.currency_symbol {
            config.display.currency_symbol = symbol;
        }
        if let Some(date_format) = display.date_format {
            config.display.date_format = date_format;
        }
    }

    if let Some(tour) = raw.tour {
        if let Some(delay) = tour.reset_delay_ms {
            config.tour.reset_delay_ms = delay;
        }
        if let Some(steps) = tour.steps {
            config.tour.steps = steps;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &RunwayConfig) -> Result<()> {
    if config.tour.steps.is_empty() {
        return Err(Error::Config("tour must have at least one step".to_string()));
    }

    let t = &config.insights;
    if t.low_savings_rate_pct > t.high_savings_rate_pct {
        return Err(Error::Config(format!(
            "low_savings_rate_pct ({}) exceeds high_savings_rate_pct ({})",
            t.low_savings_rate_pct, t.high_savings_rate_pct
        )));
    }

    Ok(())
}
