//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Overall classification of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightStatus {
    /// Nothing to analyze yet, or the runway figures are missing
    Neutral,
    /// Runway meets the emergency buffer
    Success,
    /// Runway is below the emergency buffer
    Warning,
    /// Less than a month of runway
    Critical,
}

impl InsightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightStatus::Neutral => "neutral",
            InsightStatus::Success => "success",
            InsightStatus::Warning => "warning",
            InsightStatus::Critical => "critical",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            InsightStatus::Neutral => 0,
            InsightStatus::Success => 1,
            InsightStatus::Warning => 2,
            InsightStatus::Critical => 3,
        }
    }
}

impl fmt::Display for InsightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neutral" => Ok(InsightStatus::Neutral),
            "success" => Ok(InsightStatus::Success),
            "warning" => Ok(InsightStatus::Warning),
            "critical" => Ok(InsightStatus::Critical),
            _ => Err(format!("Unknown insight status: {}", s)),
        }
    }
}

/// The rule that produced an observation, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightRule {
    /// Runway vs. emergency buffer; decides status and headline
    Safety,
    /// Cash flow and savings rate
    Efficiency,
    /// Runway far beyond the buffer while capacity sits idle
    ExcessLiquidity,
    /// A one-time purchase that consumes all investment capacity
    OneTimePurchase,
}

impl InsightRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightRule::Safety => "safety",
            InsightRule::Efficiency => "efficiency",
            InsightRule::ExcessLiquidity => "excess_liquidity",
            InsightRule::OneTimePurchase => "one_time_purchase",
        }
    }
}

impl fmt::Display for InsightRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single sentence of commentary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub rule: InsightRule,
    pub message: String,
}

/// Thresholds the rules compare against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    /// Runway below this many months is critical
    pub critical_runway_months: f64,
    /// Savings rate (%) above which efficiency is praised
    pub high_savings_rate_pct: f64,
    /// Savings rate (%) below which growth is flagged as slow
    pub low_savings_rate_pct: f64,
    /// Runway above `buffer * multiple` counts as excess liquidity
    pub excess_liquidity_multiple: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            critical_runway_months: 1.0,
            high_savings_rate_pct: 30.0,
            low_savings_rate_pct: 10.0,
            excess_liquidity_multiple: 2.0,
        }
    }
}

/// Result of evaluating a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInsight {
    pub headline: String,
    pub status: InsightStatus,
    /// All observations joined with single spaces
    pub text: String,
    /// Individual sentences in rule order
    pub observations: Vec<Observation>,
    /// Monthly surplus as a percentage of income, when surplus is positive
    pub savings_rate: Option<f64>,
}

impl AnalysisInsight {
    /// Placeholder shown before any simulation has run
    pub fn pending() -> Self {
        Self {
            headline: "Awaiting Simulation".to_string(),
            status: InsightStatus::Neutral,
            text: "Run a simulation to see an analysis of your financial health.".to_string(),
            observations: vec![],
            savings_rate: None,
        }
    }

    /// Observations produced by a given rule
    pub fn observations_for(&self, rule: InsightRule) -> impl Iterator<Item = &Observation> {
        self.observations.iter().filter(move |o| o.rule == rule)
    }
}
