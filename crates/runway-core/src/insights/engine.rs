//! Insight Engine - runs the ordered rule list over a snapshot

use crate::models::FinancialSnapshot;

use super::rules::{EfficiencyRule, ExcessLiquidityRule, OneTimePurchaseRule, SafetyRule};
use super::types::{AnalysisInsight, InsightRule, InsightStatus, InsightThresholds, Observation};

/// Headline used when no registered rule classifies the snapshot
const UNCLASSIFIED_HEADLINE: &str = "Analysis Complete";

/// Accumulates rule output during a single evaluation
#[derive(Debug, Default)]
pub struct Draft {
    verdict: Option<(InsightStatus, String)>,
    observations: Vec<Observation>,
    savings_rate: Option<f64>,
}

impl Draft {
    /// Set status and headline; the first rule to classify wins
    pub fn classify(&mut self, status: InsightStatus, headline: impl Into<String>) {
        if self.verdict.is_none() {
            self.verdict = Some((status, headline.into()));
        }
    }

    /// Append a sentence of commentary
    pub fn note(&mut self, rule: InsightRule, message: impl Into<String>) {
        self.observations.push(Observation {
            rule,
            message: message.into(),
        });
    }

    pub fn set_savings_rate(&mut self, rate: f64) {
        self.savings_rate = Some(rate);
    }

    fn finish(self) -> AnalysisInsight {
        let (status, headline) = self
            .verdict
            .unwrap_or_else(|| (InsightStatus::Neutral, UNCLASSIFIED_HEADLINE.to_string()));

        let text = self
            .observations
            .iter()
            .map(|o| o.message.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        AnalysisInsight {
            headline,
            status,
            text,
            observations: self.observations,
            savings_rate: self.savings_rate,
        }
    }
}

/// A single step of the analysis
pub trait Rule: Send + Sync {
    /// Identifier attached to the observations this rule produces
    fn id(&self) -> InsightRule;

    /// Inspect the snapshot and record findings in the draft
    fn evaluate(
        &self,
        snapshot: &FinancialSnapshot,
        thresholds: &InsightThresholds,
        draft: &mut Draft,
    );
}

/// Deterministic commentary engine over financial snapshots
pub struct InsightEngine {
    thresholds: InsightThresholds,
    rules: Vec<Box<dyn Rule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules and default thresholds
    pub fn new() -> Self {
        Self::with_thresholds(InsightThresholds::default())
    }

    /// Create an engine with the built-in rules and custom thresholds
    pub fn with_thresholds(thresholds: InsightThresholds) -> Self {
        let mut engine = Self {
            thresholds,
            rules: vec![],
        };

        // Order matters: safety decides the headline, the rest only append
        engine.register(Box::new(SafetyRule));
        engine.register(Box::new(EfficiencyRule));
        engine.register(Box::new(ExcessLiquidityRule));
        engine.register(Box::new(OneTimePurchaseRule));

        engine
    }

    /// Append a rule after the existing ones
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Evaluate a snapshot
    pub fn evaluate(&self, snapshot: &FinancialSnapshot) -> AnalysisInsight {
        let mut draft = Draft::default();

        for rule in &self.rules {
            let before = draft.observations.len();
            rule.evaluate(snapshot, &self.thresholds, &mut draft);
            tracing::debug!(
                rule = rule.id().as_str(),
                added = draft.observations.len() - before,
                "Insight rule evaluated"
            );
        }

        let insight = draft.finish();
        tracing::debug!(
            status = insight.status.as_str(),
            observations = insight.observations.len(),
            "Insight evaluation complete"
        );
        insight
    }

    /// Evaluate a snapshot if there is one, otherwise return the pending placeholder
    pub fn evaluate_optional(&self, snapshot: Option<&FinancialSnapshot>) -> AnalysisInsight {
        match snapshot {
            Some(snapshot) => self.evaluate(snapshot),
            None => AnalysisInsight::pending(),
        }
    }

    pub fn thresholds(&self) -> &InsightThresholds {
        &self.thresholds
    }

    /// Registered rules in evaluation order
    pub fn rules(&self) -> Vec<InsightRule> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Constraints, Financials, HealthMetrics, ScenarioExpenses};

    fn snapshot(runway: f64, buffer: f64, surplus: f64, income: f64, capacity: f64) -> FinancialSnapshot {
        FinancialSnapshot {
            financials: Financials {
                monthly_surplus: surplus,
                total_income: income,
                investment_capacity: capacity,
            },
            health: HealthMetrics {
                runway_months: runway,
                ..Default::default()
            },
            constraints: Constraints {
                emergency_buffer_months: buffer,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = InsightEngine::new();
        assert_eq!(
            engine.rules(),
            vec![
                InsightRule::Safety,
                InsightRule::Efficiency,
                InsightRule::ExcessLiquidity,
                InsightRule::OneTimePurchase,
            ]
        );
        assert_eq!(engine.thresholds(), &InsightThresholds::default());
    }

    #[test]
    fn test_safety_classification_table() {
        let engine = InsightEngine::new();
        let cases = [
            // (runway, buffer, status, headline)
            (0.0, 6.0, InsightStatus::Critical, "Immediate Insolvency Risk"),
            (0.99, 0.5, InsightStatus::Critical, "Immediate Insolvency Risk"),
            (1.0, 6.0, InsightStatus::Warning, "Vulnerable Strategy"),
            (5.9, 6.0, InsightStatus::Warning, "Vulnerable Strategy"),
            (6.0, 6.0, InsightStatus::Success, "Solid Foundation"),
            (30.0, 3.0, InsightStatus::Success, "Solid Foundation"),
        ];

        for (runway, buffer, status, headline) in cases {
            let insight = engine.evaluate(&snapshot(runway, buffer, 500.0, 5000.0, 0.0));
            assert_eq!(insight.status, status, "runway={} buffer={}", runway, buffer);
            assert_eq!(insight.headline, headline);
        }
    }

    #[test]
    fn test_critical_ignores_other_fields() {
        let engine = InsightEngine::new();
        let mut snap = snapshot(0.5, 0.0, 90_000.0, 100_000.0, 50_000.0);
        snap.expenses.one_time = 1_000_000.0;

        let insight = engine.evaluate(&snap);
        assert_eq!(insight.status, InsightStatus::Critical);
    }

    #[test]
    fn test_shortfall_rounded_to_one_decimal() {
        let engine = InsightEngine::new();
        let insight = engine.evaluate(&snapshot(2.26, 6.0, 500.0, 5000.0, 0.0));
        assert!(insight.text.contains("3.7 months short"), "{}", insight.text);

        // Exact ties round up
        let tie = engine.evaluate(&snapshot(5.75, 6.0, 500.0, 5000.0, 0.0));
        assert!(tie.text.contains("0.3 months short"), "{}", tie.text);
    }

    #[test]
    fn test_fractional_buffer_formatted_like_runway() {
        let engine = InsightEngine::new();

        let warning = engine.evaluate(&snapshot(4.0, 19.0 / 3.0, 500.0, 5000.0, 0.0));
        assert!(
            warning.text.contains("2.3 months short of your 6.3-month emergency buffer"),
            "{}",
            warning.text
        );

        let success = engine.evaluate(&snapshot(8.0, 6.0, 500.0, 5000.0, 0.0));
        assert!(success.text.contains("your 6.0-month safety target"), "{}", success.text);
    }

    #[test]
    fn test_negative_cashflow_does_not_change_status() {
        let engine = InsightEngine::new();
        let insight = engine.evaluate(&snapshot(8.0, 6.0, -200.0, 4000.0, 0.0));

        assert_eq!(insight.status, InsightStatus::Success);
        assert!(insight.text.contains("spending more than you earn"));
        assert!(insight.savings_rate.is_none());
    }

    #[test]
    fn test_savings_rate_branches() {
        let engine = InsightEngine::new();

        let high = engine.evaluate(&snapshot(8.0, 6.0, 2000.0, 5000.0, 0.0));
        assert!(high.text.contains("saving 40% of your income"), "{}", high.text);

        let low = engine.evaluate(&snapshot(8.0, 6.0, 250.0, 5000.0, 0.0));
        assert!(low.text.contains("savings rate of 5%"), "{}", low.text);

        let middle = engine.evaluate(&snapshot(8.0, 6.0, 1000.0, 5000.0, 0.0));
        assert_eq!(middle.observations_for(InsightRule::Efficiency).count(), 0);
        assert_eq!(middle.savings_rate, Some(20.0));

        // 2500 / 4000 is exactly 62.5%, which rounds up rather than to even
        let tie = engine.evaluate(&snapshot(8.0, 6.0, 2500.0, 4000.0, 0.0));
        assert!(tie.text.contains("saving 63% of your income"), "{}", tie.text);
    }

    #[test]
    fn test_zero_income_does_not_panic() {
        let engine = InsightEngine::new();
        let insight = engine.evaluate(&snapshot(8.0, 6.0, 1000.0, 0.0, 0.0));

        // Rate defined as 0%, which counts as low growth
        assert_eq!(insight.savings_rate, Some(0.0));
        assert!(insight.text.contains("savings rate of 0%"));
    }

    #[test]
    fn test_excess_liquidity_requires_capacity() {
        let engine = InsightEngine::new();

        let idle = engine.evaluate(&snapshot(20.0, 6.0, 1000.0, 5000.0, 1000.0));
        assert!(idle.text.contains("With 20.0 months of runway"));

        let no_capacity = engine.evaluate(&snapshot(20.0, 6.0, 1000.0, 5000.0, 0.0));
        assert_eq!(
            no_capacity
                .observations_for(InsightRule::ExcessLiquidity)
                .count(),
            0
        );

        let at_ceiling = engine.evaluate(&snapshot(12.0, 6.0, 1000.0, 5000.0, 1000.0));
        assert_eq!(
            at_ceiling
                .observations_for(InsightRule::ExcessLiquidity)
                .count(),
            0
        );
    }

    #[test]
    fn test_one_time_purchase_named() {
        let engine = InsightEngine::new();
        let mut snap = snapshot(8.0, 6.0, 1000.0, 5000.0, 0.0);
        snap.expenses = ScenarioExpenses {
            one_time: 35_000.0,
            one_time_name: Some("New Car".to_string()),
        };

        let insight = engine.evaluate(&snap);
        assert!(insight.text.contains("The New Car purchase blocks"));
    }

    #[test]
    fn test_one_time_purchase_with_partial_capacity_is_silent() {
        let engine = InsightEngine::new();
        let mut snap = snapshot(8.0, 6.0, 1000.0, 5000.0, 10.0);
        snap.expenses.one_time = 35_000.0;

        let insight = engine.evaluate(&snap);
        assert_eq!(
            insight
                .observations_for(InsightRule::OneTimePurchase)
                .count(),
            0
        );
    }

    #[test]
    fn test_text_joins_observations_in_rule_order() {
        let engine = InsightEngine::new();
        let mut snap = snapshot(3.0, 6.0, -100.0, 5000.0, 0.0);
        snap.expenses.one_time = 9000.0;

        let insight = engine.evaluate(&snap);
        let rules: Vec<_> = insight.observations.iter().map(|o| o.rule).collect();
        assert_eq!(
            rules,
            vec![
                InsightRule::Safety,
                InsightRule::Efficiency,
                InsightRule::OneTimePurchase
            ]
        );

        let expected = insight
            .observations
            .iter()
            .map(|o| o.message.clone())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(insight.text, expected);
    }

    #[test]
    fn test_custom_thresholds() {
        let engine = InsightEngine::with_thresholds(InsightThresholds {
            high_savings_rate_pct: 15.0,
            ..Default::default()
        });
        let insight = engine.evaluate(&snapshot(8.0, 6.0, 1000.0, 5000.0, 0.0));
        assert!(insight.text.contains("saving 20% of your income"));
    }

    #[test]
    fn test_non_finite_runway_is_not_assessed() {
        let engine = InsightEngine::new();

        for (runway, buffer) in [
            (f64::NAN, 6.0),
            (f64::INFINITY, 6.0),
            (8.0, f64::NAN),
        ] {
            let insight = engine.evaluate(&snapshot(runway, buffer, 1000.0, 5000.0, 100.0));
            assert_eq!(
                insight.status,
                InsightStatus::Neutral,
                "runway={} buffer={}",
                runway,
                buffer
            );
            assert_eq!(insight.headline, "Incomplete Simulation");
            assert!(!insight.text.contains("NaN"), "{}", insight.text);
            assert!(!insight.text.contains("inf months"), "{}", insight.text);
        }
    }

    #[test]
    fn test_evaluate_optional_pending() {
        let engine = InsightEngine::new();
        let insight = engine.evaluate_optional(None);
        assert_eq!(insight.status, InsightStatus::Neutral);
        assert!(insight.observations.is_empty());
    }

    struct AlwaysCritical;

    impl Rule for AlwaysCritical {
        fn id(&self) -> InsightRule {
            InsightRule::Safety
        }

        fn evaluate(&self, _: &FinancialSnapshot, _: &InsightThresholds, draft: &mut Draft) {
            draft.classify(InsightStatus::Critical, "Overridden");
        }
    }

    #[test]
    fn test_registered_rule_cannot_override_verdict() {
        let mut engine = InsightEngine::new();
        engine.register(Box::new(AlwaysCritical));

        let insight = engine.evaluate(&snapshot(8.0, 6.0, 1000.0, 5000.0, 0.0));
        assert_eq!(insight.status, InsightStatus::Success);
        assert_eq!(insight.headline, "Solid Foundation");
    }
}
