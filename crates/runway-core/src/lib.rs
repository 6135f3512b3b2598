//! Runway Core Library
//!
//! Explanatory layer over precomputed financial sandbox simulations:
//! - Data model for blueprints and financial snapshots
//! - Rule-based insight engine (health commentary)
//! - Blueprint detail renderer (read-only report)
//! - Guided tour state machine with deferred reset
//! - TOML configuration for thresholds, tour steps and display options

pub mod config;
pub mod detail;
pub mod error;
pub mod format;
pub mod insights;
pub mod models;
pub mod tour;

pub use config::{DisplayOptions, RunwayConfig, TourConfig};
pub use detail::{render_blueprint, BlueprintReport, RiskBadge};
pub use error::{Error, Result};
pub use insights::{AnalysisInsight, InsightEngine, InsightRule, InsightStatus, InsightThresholds};
pub use models::{Blueprint, FinancialSnapshot, RiskLevel};
pub use tour::{TourController, TourProgress, TourState, TourStep, TourTransition};
