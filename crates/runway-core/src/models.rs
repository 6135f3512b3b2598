//! Domain models for Runway
//!
//! These mirror the JSON produced by the upstream simulation engine (camelCase
//! keys). Every section derives `Default` so partially populated records still
//! deserialize; the engine and renderer treat missing numbers as zero.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Label used when a one-time purchase has no name
pub const UNNAMED_EXPENSE_LABEL: &str = "Scenario Expense";

/// Overall risk classification computed by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Monthly cash flow figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Financials {
    /// Income minus expenses per month (negative when burning cash)
    pub monthly_surplus: f64,
    pub total_income: f64,
    /// Surplus left for investing after other commitments
    pub investment_capacity: f64,
}

/// Health indicators computed by the simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthMetrics {
    /// Months of expenses covered by liquid assets
    pub runway_months: f64,
    /// Expenses as a fraction of income (0.65 = 65%)
    pub expense_to_income_ratio: f64,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
}

/// User-configured safety constraints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    /// Target runway considered safe
    pub emergency_buffer_months: f64,
}

/// One-off spending included in the scenario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenarioExpenses {
    pub one_time: f64,
    pub one_time_name: Option<String>,
}

impl ScenarioExpenses {
    /// Display name for the one-time purchase, falling back to a generic label
    pub fn one_time_label(&self) -> &str {
        match self.one_time_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => UNNAMED_EXPENSE_LABEL,
        }
    }
}

/// Investment preferences chosen by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestmentPreferences {
    pub risk_tolerance: String,
    pub allocation_pct: f64,
}

/// Everything the insight engine looks at
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSnapshot {
    pub financials: Financials,
    pub health: HealthMetrics,
    pub constraints: Constraints,
    pub expenses: ScenarioExpenses,
    pub investment: InvestmentPreferences,
}

impl FinancialSnapshot {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// Inputs the user fed into the simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintInputs {
    pub constraints: Constraints,
    pub expenses: ScenarioExpenses,
    pub investment: InvestmentPreferences,
}

/// Year-by-year projection of the invested balance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Projection {
    /// Projected value indexed by year (index 0 is the starting balance)
    pub projected_returns: Vec<f64>,
}

impl Projection {
    /// Value at `year`, falling back to the last projected year, then zero
    pub fn value_at_year(&self, year: usize) -> f64 {
        self.projected_returns
            .get(year)
            .or_else(|| self.projected_returns.last())
            .copied()
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestmentOutcome {
    pub actual_investment: f64,
    pub projection: Projection,
}

/// Computed simulation results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlueprintOutputs {
    pub financials: Financials,
    pub health: HealthMetrics,
    pub investment: InvestmentOutcome,
}

/// A saved simulation scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<u32>,
    /// ISO-8601 timestamp; kept raw so a malformed value degrades to text
    pub created_at: String,
    #[serde(default)]
    pub inputs: BlueprintInputs,
    #[serde(default)]
    pub outputs: BlueprintOutputs,
}

impl Blueprint {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Assemble the snapshot this blueprint describes
    pub fn snapshot(&self) -> FinancialSnapshot {
        FinancialSnapshot {
            financials: self.outputs.financials.clone(),
            health: self.outputs.health.clone(),
            constraints: self.inputs.constraints.clone(),
            expenses: self.inputs.expenses.clone(),
            investment: self.inputs.investment.clone(),
        }
    }
}
