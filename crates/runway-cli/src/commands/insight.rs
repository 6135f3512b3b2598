//! Insight command implementation

use std::path::Path;

use anyhow::{Context, Result};
use runway_core::insights::{AnalysisInsight, InsightEngine, InsightStatus};
use runway_core::models::FinancialSnapshot;
use runway_core::RunwayConfig;

pub fn status_icon(status: InsightStatus) -> &'static str {
    match status {
        InsightStatus::Critical => "🚨",
        InsightStatus::Warning => "⚠️ ",
        InsightStatus::Success => "✅",
        InsightStatus::Neutral => "💬",
    }
}

/// Plain-text rendering of an analysis
pub fn format_insight(insight: &AnalysisInsight) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "🤖 AI Analysis: {} {}\n",
        status_icon(insight.status),
        insight.headline
    ));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");
    for observation in &insight.observations {
        out.push_str(&format!("   • {}\n", observation.message));
    }
    if let Some(rate) = insight.savings_rate {
        out.push_str(&format!("   Savings rate: {:.1}%\n", rate));
    }
    out
}

/// Analyze a snapshot file
///
/// With `fail_on`, returns an error once the analysis is printed if its
/// status is at least that severe, so scripts can gate on the exit code.
pub fn cmd_insight(
    config: &RunwayConfig,
    file: &Path,
    json: bool,
    fail_on: Option<&str>,
) -> Result<()> {
    let threshold = fail_on
        .map(|s| s.trim().to_lowercase().parse::<InsightStatus>())
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let snapshot = FinancialSnapshot::load(file)
        .with_context(|| format!("Failed to read snapshot {}", file.display()))?;

    let engine = InsightEngine::with_thresholds(config.insights.clone());
    let insight = engine.evaluate(&snapshot);

    if json {
        println!("{}", serde_json::to_string_pretty(&insight)?);
    } else {
        println!();
        print!("{}", format_insight(&insight));
    }

    if let Some(threshold) = threshold {
        if insight.status.priority() >= threshold.priority() {
            anyhow::bail!(
                "Insight status is {} (fail-on threshold: {})",
                insight.status,
                threshold
            );
        }
    }

    Ok(())
}
