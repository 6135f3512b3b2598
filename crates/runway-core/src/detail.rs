//! Blueprint detail renderer
//!
//! Turns a saved [`Blueprint`] into a read-only [`BlueprintReport`]: formatted
//! strings ready to print or serialize. Nothing here computes new figures;
//! it formats and indexes what the simulation already produced.

use std::fmt;

use serde::Serialize;

use crate::config::DisplayOptions;
use crate::format::{format_currency, format_long_date, format_months, format_ratio_percent};
use crate::models::{Blueprint, RiskLevel};

/// Horizon of the headline investment projection
pub const PROJECTION_YEARS: usize = 10;

/// Version shown for blueprints saved before versioning existed
const DEFAULT_VERSION: u32 = 1;

/// Risk level badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskBadge {
    pub level: RiskLevel,
    pub label: String,
    /// Colour name keyed by risk level
    pub color: &'static str,
}

impl RiskBadge {
    pub fn for_level(level: RiskLevel) -> Self {
        let (label, color) = match level {
            RiskLevel::Low => ("Low Risk", "green"),
            RiskLevel::Medium => ("Medium Risk", "amber"),
            RiskLevel::High => ("High Risk", "red"),
        };
        Self {
            level,
            label: label.to_string(),
            color,
        }
    }
}

/// Runway compared against the emergency buffer target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunwayComparison {
    pub runway: String,
    pub target: String,
    pub meets_target: bool,
}

/// Formatted, read-only view of a blueprint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlueprintReport {
    pub id: String,
    pub name: String,
    /// Long-form creation date, or the raw timestamp if it can't be parsed
    pub created: String,
    pub version_badge: String,
    pub risk: RiskBadge,
    pub monthly_surplus: String,
    pub projected_value: String,
    pub expense_ratio: String,
    pub runway: RunwayComparison,
    /// Empty when the simulation found no risk factors
    pub risk_factors: Vec<String>,
}

/// Render a blueprint; `None` renders nothing
pub fn render_blueprint(
    blueprint: Option<&Blueprint>,
    options: &DisplayOptions,
) -> Option<BlueprintReport> {
    let blueprint = blueprint?;
    let outputs = &blueprint.outputs;
    let symbol = options.currency_symbol.as_str();

    let created = format_long_date(&blueprint.created_at, &options.date_format)
        .unwrap_or_else(|| {
            tracing::warn!(
                id = %blueprint.id,
                created_at = %blueprint.created_at,
                "Unparseable blueprint timestamp"
            );
            blueprint.created_at.clone()
        });

    let runway = outputs.health.runway_months;
    let target = blueprint.inputs.constraints.emergency_buffer_months;

    Some(BlueprintReport {
        id: blueprint.id.clone(),
        name: blueprint.name.clone(),
        created,
        version_badge: format!("v{}", blueprint.version.unwrap_or(DEFAULT_VERSION)),
        risk: RiskBadge::for_level(outputs.health.risk_level),
        monthly_surplus: format_currency(outputs.financials.monthly_surplus, symbol),
        projected_value: format_currency(
            outputs
                .investment
                .projection
                .value_at_year(PROJECTION_YEARS),
            symbol,
        ),
        expense_ratio: format_ratio_percent(outputs.health.expense_to_income_ratio),
        runway: RunwayComparison {
            runway: format!("{} months", format_months(runway)),
            target: format!("{} months", format_months(target)),
            meets_target: runway >= target,
        },
        risk_factors: outputs.health.risk_factors.clone(),
    })
}

impl BlueprintReport {
    pub fn has_risk_factors(&self) -> bool {
        !self.risk_factors.is_empty()
    }
}

impl fmt::Display for BlueprintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.version_badge)?;
        writeln!(f, "   ID: {}", self.id)?;
        writeln!(f, "   Created: {}", self.created)?;
        writeln!(f, "   Risk: {} [{}]", self.risk.label, self.risk.color)?;
        writeln!(
            f,
            "   ─────────────────────────────────────────────────────────────"
        )?;
        writeln!(f, "   {:24} {:>16}", "Monthly surplus", self.monthly_surplus)?;
        writeln!(
            f,
            "   {:24} {:>16}",
            format!("{}-year projection", PROJECTION_YEARS),
            self.projected_value
        )?;
        writeln!(f, "   {:24} {:>16}", "Expense ratio", self.expense_ratio)?;
        writeln!(
            f,
            "   {:24} {:>16}  (target {}{})",
            "Runway",
            self.runway.runway,
            self.runway.target,
            if self.runway.meets_target { ", met" } else { ", below" }
        )?;

        if self.has_risk_factors() {
            writeln!(f)?;
            writeln!(f, "   ⚠️  Risk factors")?;
            for (i, factor) in self.risk_factors.iter().enumerate() {
                writeln!(f, "   {}. {}", i + 1, factor)?;
            }
        }

        Ok(())
    }
}

/// Detail screen for one blueprint with a way back to the list
pub struct DetailView<F: FnMut()> {
    report: Option<BlueprintReport>,
    on_back: F,
}

impl<F: FnMut()> DetailView<F> {
    pub fn new(blueprint: Option<&Blueprint>, options: &DisplayOptions, on_back: F) -> Self {
        Self {
            report: render_blueprint(blueprint, options),
            on_back,
        }
    }

    pub fn report(&self) -> Option<&BlueprintReport> {
        self.report.as_ref()
    }

    /// Ask the host to navigate back to the list
    pub fn back(&mut self) {
        (self.on_back)();
    }
}
