//! Insight Engine - rule-based financial health commentary
//!
//! The "AI" analysis shown next to a simulation is a deterministic, ordered
//! list of threshold rules. The first rule classifies the snapshot (status and
//! headline); every rule may append sentences to the narrative.
//!
//! ## Rules, in evaluation order
//!
//! - **Safety** - runway vs. the critical floor and the emergency buffer
//! - **Efficiency** - cash flow direction and savings rate
//! - **Excess Liquidity** - far more runway than needed while capacity is idle
//! - **One-time Purchase** - a purchase that leaves nothing to invest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use runway_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let insight = engine.evaluate(&snapshot);
//! println!("{}: {}", insight.headline, insight.text);
//! ```

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{Draft, InsightEngine, Rule};
pub use rules::{
    savings_rate, EfficiencyRule, ExcessLiquidityRule, OneTimePurchaseRule, SafetyRule,
};
pub use types::{AnalysisInsight, InsightRule, InsightStatus, InsightThresholds, Observation};
