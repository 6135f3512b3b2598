//! Built-in insight rules
//!
//! Each rule looks at one aspect of the snapshot and appends at most a couple
//! of sentences. Only the safety rule classifies the snapshot.

use crate::format::{format_months, format_whole_percent};
use crate::models::FinancialSnapshot;

use super::engine::{Draft, Rule};
use super::types::{InsightRule, InsightStatus, InsightThresholds};

/// Monthly surplus as a percentage of income; zero when there is no income
pub fn savings_rate(monthly_surplus: f64, total_income: f64) -> f64 {
    if total_income > 0.0 && total_income.is_finite() {
        monthly_surplus / total_income * 100.0
    } else {
        0.0
    }
}

/// Runway compared against the critical floor and the emergency buffer
pub struct SafetyRule;

impl Rule for SafetyRule {
    fn id(&self) -> InsightRule {
        InsightRule::Safety
    }

    fn evaluate(
        &self,
        snapshot: &FinancialSnapshot,
        thresholds: &InsightThresholds,
        draft: &mut Draft,
    ) {
        let runway = snapshot.health.runway_months;
        let buffer = snapshot.constraints.emergency_buffer_months;

        if !runway.is_finite() || !buffer.is_finite() {
            draft.classify(InsightStatus::Neutral, "Incomplete Simulation");
            draft.note(
                self.id(),
                "Runway figures are missing for this scenario, so its safety can't be assessed.",
            );
        } else if runway < thresholds.critical_runway_months {
            draft.classify(InsightStatus::Critical, "Immediate Insolvency Risk");
            draft.note(
                self.id(),
                "Your liquid reserves cover less than a month of expenses. \
                 Any disruption to income would leave you unable to meet your obligations.",
            );
        } else if runway < buffer {
            let shortfall = buffer - runway;
            draft.classify(InsightStatus::Warning, "Vulnerable Strategy");
            draft.note(
                self.id(),
                format!(
                    "Your runway falls {} months short of your {}-month emergency buffer.",
                    format_months(shortfall),
                    format_months(buffer)
                ),
            );
        } else {
            draft.classify(InsightStatus::Success, "Solid Foundation");
            draft.note(
                self.id(),
                format!(
                    "Your {} months of runway meet your {}-month safety target.",
                    format_months(runway),
                    format_months(buffer)
                ),
            );
        }
    }
}

/// Cash flow direction and savings rate
pub struct EfficiencyRule;

impl Rule for EfficiencyRule {
    fn id(&self) -> InsightRule {
        InsightRule::Efficiency
    }

    fn evaluate(
        &self,
        snapshot: &FinancialSnapshot,
        thresholds: &InsightThresholds,
        draft: &mut Draft,
    ) {
        let surplus = snapshot.financials.monthly_surplus;

        if surplus <= 0.0 {
            draft.note(
                self.id(),
                "You are spending more than you earn each month, so your reserves are shrinking.",
            );
            return;
        }

        let rate = savings_rate(surplus, snapshot.financials.total_income);
        draft.set_savings_rate(rate);

        if rate > thresholds.high_savings_rate_pct {
            draft.note(
                self.id(),
                format!(
                    "Excellent efficiency: you are saving {}% of your income.",
                    format_whole_percent(rate)
                ),
            );
        } else if rate < thresholds.low_savings_rate_pct {
            draft.note(
                self.id(),
                format!(
                    "A savings rate of {}% leaves little room for long-term growth.",
                    format_whole_percent(rate)
                ),
            );
        }
    }
}

/// Cash piling up far beyond the buffer while capacity is available
pub struct ExcessLiquidityRule;

impl Rule for ExcessLiquidityRule {
    fn id(&self) -> InsightRule {
        InsightRule::ExcessLiquidity
    }

    fn evaluate(
        &self,
        snapshot: &FinancialSnapshot,
        thresholds: &InsightThresholds,
        draft: &mut Draft,
    ) {
        let runway = snapshot.health.runway_months;
        let ceiling =
            snapshot.constraints.emergency_buffer_months * thresholds.excess_liquidity_multiple;

        let idle_capacity = snapshot.financials.investment_capacity > 0.0;

        if runway.is_finite() && runway > ceiling && idle_capacity {
            draft.note(
                self.id(),
                format!(
                    "With {} months of runway you may be holding too much cash. \
                     Consider reallocating part of it toward investments.",
                    format_months(runway)
                ),
            );
        }
    }
}

/// A one-time purchase that leaves nothing to invest
pub struct OneTimePurchaseRule;

impl Rule for OneTimePurchaseRule {
    fn id(&self) -> InsightRule {
        InsightRule::OneTimePurchase
    }

    fn evaluate(
        &self,
        snapshot: &FinancialSnapshot,
        _thresholds: &InsightThresholds,
        draft: &mut Draft,
    ) {
        let expenses = &snapshot.expenses;

        // Exactly zero: partially reduced capacity does not trigger this rule
        if expenses.one_time > 0.0 && snapshot.financials.investment_capacity == 0.0 {
            draft.note(
                self.id(),
                format!(
                    "The {} purchase blocks your investment capacity for this scenario.",
                    expenses.one_time_label()
                ),
            );
        }
    }
}
