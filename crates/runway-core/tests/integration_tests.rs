//! Integration tests for runway-core
//!
//! These tests exercise the load → evaluate → render workflow on fixture
//! files shaped like the simulation engine's output.

use std::time::Duration;

use runway_core::{
    format::format_months,
    insights::{InsightEngine, InsightRule, InsightStatus},
    models::{Blueprint, FinancialSnapshot},
    render_blueprint, RunwayConfig, TourController,
};

const BLUEPRINT: &str = include_str!("fixtures/blueprint.json");
const CAR_PURCHASE: &str = include_str!("fixtures/snapshot_car_purchase.json");

fn snapshot_json(runway: f64, buffer: f64, surplus: f64, income: f64, capacity: f64) -> String {
    format!(
        r#"{{
            "financials": {{"monthlySurplus": {surplus}, "totalIncome": {income}, "investmentCapacity": {capacity}}},
            "health": {{"runwayMonths": {runway}, "expenseToIncomeRatio": 0.5, "riskLevel": "medium", "riskFactors": []}},
            "constraints": {{"emergencyBufferMonths": {buffer}}},
            "expenses": {{"oneTime": 0}},
            "investment": {{"riskTolerance": "moderate", "allocationPct": 50}}
        }}"#
    )
}

// =============================================================================
// Insight Engine Examples
// =============================================================================

#[test]
fn test_insolvency_example() {
    let snapshot = FinancialSnapshot::from_json(&snapshot_json(0.5, 6.0, 300.0, 4000.0, 0.0))
        .expect("Failed to parse snapshot");

    let insight = InsightEngine::new().evaluate(&snapshot);
    assert_eq!(insight.status, InsightStatus::Critical);
    assert!(insight.headline.contains("Insolvency"));
}

#[test]
fn test_vulnerable_example() {
    let snapshot =
        FinancialSnapshot::from_json(&snapshot_json(3.0, 6.0, 5000.0, 50000.0, 0.0)).unwrap();

    let insight = InsightEngine::new().evaluate(&snapshot);
    assert_eq!(insight.status, InsightStatus::Warning);
    assert!(insight.text.contains("3.0 months"), "{}", insight.text);

    // 10% sits between the low and high bands
    assert_eq!(insight.observations_for(InsightRule::Efficiency).count(), 0);
}

#[test]
fn test_excess_liquidity_example() {
    let snapshot =
        FinancialSnapshot::from_json(&snapshot_json(20.0, 6.0, 1000.0, 5000.0, 1000.0)).unwrap();

    let insight = InsightEngine::new().evaluate(&snapshot);
    assert_eq!(insight.status, InsightStatus::Success);
    assert_eq!(
        insight
            .observations_for(InsightRule::ExcessLiquidity)
            .count(),
        1
    );
}

#[test]
fn test_unnamed_purchase_example() {
    let snapshot = FinancialSnapshot::from_json(CAR_PURCHASE).unwrap();

    let insight = InsightEngine::new().evaluate(&snapshot);
    assert_eq!(insight.status, InsightStatus::Warning);
    assert!(insight.text.contains("Scenario Expense"));
    assert!(insight.text.contains("savings rate of 6%"));
}

#[test]
fn test_evaluation_is_idempotent() {
    let engine = InsightEngine::new();
    let snapshot = FinancialSnapshot::from_json(CAR_PURCHASE).unwrap();

    assert_eq!(engine.evaluate(&snapshot), engine.evaluate(&snapshot));
}

#[test]
fn test_status_bands_hold_across_grid() {
    let engine = InsightEngine::new();

    for buffer in [1.0, 3.0, 6.0, 12.0] {
        for tenths in 0..200 {
            let runway = tenths as f64 / 10.0;
            let snapshot = FinancialSnapshot::from_json(&snapshot_json(
                runway, buffer, -50.0, 3000.0, 250.0,
            ))
            .unwrap();
            let insight = engine.evaluate(&snapshot);

            let expected = if runway < 1.0 {
                InsightStatus::Critical
            } else if runway < buffer {
                InsightStatus::Warning
            } else {
                InsightStatus::Success
            };
            assert_eq!(insight.status, expected, "runway={} buffer={}", runway, buffer);

            if expected == InsightStatus::Warning {
                let shortfall = format!("{} months short", format_months(buffer - runway));
                assert!(insight.text.contains(&shortfall), "{}", insight.text);
            }
        }
    }
}

// =============================================================================
// Blueprint Workflow
// =============================================================================

#[test]
fn test_blueprint_report_and_commentary() {
    let config = RunwayConfig::embedded().unwrap();
    let blueprint = Blueprint::from_json(BLUEPRINT).expect("Failed to parse blueprint");

    let report = render_blueprint(Some(&blueprint), &config.display).unwrap();
    assert_eq!(report.name, "Emergency Fund First");
    assert_eq!(report.created, "November 2, 2024");
    assert_eq!(report.version_badge, "v2");
    assert_eq!(report.risk.color, "green");
    assert_eq!(report.monthly_surplus, "$2,150");
    assert_eq!(report.projected_value, "$223,130");
    assert_eq!(report.expense_ratio, "72.4%");
    assert!(report.runway.meets_target);
    assert!(!report.has_risk_factors());

    let engine = InsightEngine::with_thresholds(config.insights.clone());
    let insight = engine.evaluate(&blueprint.snapshot());
    assert_eq!(insight.status, InsightStatus::Success);
    assert!(insight.text.contains("With 14.3 months of runway"));
}

#[test]
fn test_report_serializes_to_json() {
    let blueprint = Blueprint::from_json(BLUEPRINT).unwrap();
    let report = render_blueprint(Some(&blueprint), &Default::default()).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["risk"]["level"], "low");
    assert_eq!(json["runway"]["meets_target"], true);
}

// =============================================================================
// Guided Tour
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_tour_full_walkthrough_from_config() {
    let config = RunwayConfig::embedded().unwrap();
    let step_count = config.tour.steps.len();
    let mut tour = TourController::from_config(&config.tour, |_| {});

    tour.open();
    assert_eq!(tour.current_step().unwrap().title, "Welcome to the Sandbox");

    for _ in 0..step_count - 1 {
        tour.advance();
    }
    assert_eq!(tour.progress().step, step_count);

    tour.advance();
    assert!(!tour.is_open());

    tokio::time::sleep(config.tour.reset_delay() + Duration::from_millis(1)).await;
    assert_eq!(tour.index(), 0);
}
