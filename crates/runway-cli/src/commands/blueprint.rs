//! Blueprint command implementations

use std::cell::Cell;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use runway_core::detail::{render_blueprint, DetailView};
use runway_core::insights::InsightEngine;
use runway_core::models::Blueprint;
use runway_core::RunwayConfig;

use super::{format_insight, next_key, truncate};

pub fn cmd_blueprint(config: &RunwayConfig, file: &Path, json: bool, with_insight: bool) -> Result<()> {
    let blueprint = Blueprint::load(file)
        .with_context(|| format!("Failed to read blueprint {}", file.display()))?;

    let report = render_blueprint(Some(&blueprint), &config.display);
    let insight = with_insight.then(|| {
        InsightEngine::with_thresholds(config.insights.clone()).evaluate(&blueprint.snapshot())
    });

    if json {
        let value = serde_json::json!({
            "report": report,
            "insight": insight,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if let Some(report) = report {
        println!();
        print!("📘 {}", report);
    }
    if let Some(insight) = insight {
        println!();
        print!("{}", format_insight(&insight));
    }

    Ok(())
}

/// Load every parseable blueprint in a directory, newest first
pub fn load_blueprints(dir: &Path) -> Result<Vec<Blueprint>> {
    let mut blueprints = Vec::new();

    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match Blueprint::load(&path) {
            Ok(blueprint) => blueprints.push(blueprint),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable blueprint");
            }
        }
    }

    // ISO-8601 timestamps sort lexically
    blueprints.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(blueprints)
}

fn print_list(out: &mut dyn Write, blueprints: &[Blueprint]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "📚 Saved Blueprints")?;
    writeln!(
        out,
        "   ─────────────────────────────────────────────────────────────"
    )?;

    if blueprints.is_empty() {
        writeln!(out, "   No blueprints found.")?;
        return Ok(());
    }

    for (i, bp) in blueprints.iter().enumerate() {
        writeln!(
            out,
            "   {:>2}. {:30} {:>4}  {:6}  {}",
            i + 1,
            truncate(&bp.name, 30),
            format!("v{}", bp.version.unwrap_or(1)),
            bp.outputs.health.risk_level.as_str(),
            bp.created_at.get(..10).unwrap_or(&bp.created_at)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "   Enter a number to open, q to quit")?;
    Ok(())
}

/// Browse blueprints: list view, detail view, and back again
pub fn cmd_blueprints(
    config: &RunwayConfig,
    dir: &Path,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let blueprints = load_blueprints(dir)?;
    print_list(out, &blueprints)?;

    while let Some(key) = next_key(input)? {
        if key == "q" {
            break;
        }

        let Some(selected) = key
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| blueprints.get(i))
        else {
            writeln!(out, "   Unknown selection: {}", key)?;
            continue;
        };

        let back_requested = Cell::new(false);
        let mut view = DetailView::new(Some(selected), &config.display, || {
            back_requested.set(true)
        });

        if let Some(report) = view.report() {
            writeln!(out)?;
            write!(out, "📘 {}", report)?;
            writeln!(out)?;
            writeln!(out, "   b = back to list, q = quit")?;
        }

        let mut quit = false;
        while let Some(key) = next_key(input)? {
            match key.as_str() {
                "b" => {
                    view.back();
                    break;
                }
                "q" => {
                    quit = true;
                    break;
                }
                other => writeln!(out, "   Unknown key: {}", other)?,
            }
        }

        if quit || !back_requested.get() {
            break;
        }
        tracing::debug!(id = %selected.id, "Back to blueprint list");
        print_list(out, &blueprints)?;
    }

    Ok(())
}
