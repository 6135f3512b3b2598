//! Tour command implementation

use std::io::{self, BufRead, Write};
use std::thread;

use anyhow::Result;
use tokio::sync::mpsc;
use runway_core::tour::{TourController, TourTransition};
use runway_core::RunwayConfig;

fn print_step(out: &mut dyn Write, tour: &TourController) -> Result<()> {
    let Some(step) = tour.current_step() else {
        return Ok(());
    };
    let progress = tour.progress();
    let filled = progress.step * 10 / progress.total;

    writeln!(out)?;
    writeln!(
        out,
        "[{}] {}  [{}{}]",
        step.icon,
        progress,
        "■".repeat(filled),
        "□".repeat(10 - filled)
    )?;
    writeln!(out, "   {}", step.title)?;
    writeln!(out, "   {}", step.description)?;
    for bullet in &step.bullets {
        writeln!(out, "   • {}", bullet)?;
    }

    let back = if progress.step > 1 { "b = back, " } else { "" };
    let next = if progress.step == progress.total {
        "n = finish"
    } else {
        "n = next"
    };
    writeln!(out, "   {}{}, s = skip", back, next)?;
    Ok(())
}

/// Read keys on a plain thread so blocking reads never stall the runtime
///
/// The thread is detached: it ends at end of input or once the receiver is
/// dropped and the next key fails to send.
fn spawn_key_reader(
    mut input: Box<dyn BufRead + Send>,
) -> mpsc::UnboundedReceiver<io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || loop {
        match super::next_key(&mut *input) {
            Ok(Some(key)) => {
                if tx.send(Ok(key)).is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                let _ = tx.send(Err(e));
                break;
            }
        }
    });
    rx
}

/// Run the onboarding tour driven by keys from `input`
pub async fn cmd_tour(
    config: &RunwayConfig,
    input: Box<dyn BufRead + Send>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut tour = TourController::from_config(&config.tour, |open| {
        tracing::debug!(open, "Tour visibility changed");
    });

    tour.open();
    print_step(out, &tour)?;

    let mut keys = spawn_key_reader(input);
    while let Some(key) = keys.recv().await {
        let key = key?;
        let transition = match key.as_str() {
            "n" => tour.advance(),
            "b" => tour.retreat(),
            "s" => tour.skip(),
            "o" => tour.open(),
            "q" => break,
            other => {
                writeln!(out, "   Unknown key: {}", other)?;
                continue;
            }
        };

        match transition {
            TourTransition::Moved { .. } | TourTransition::Opened => print_step(out, &tour)?,
            TourTransition::Closed => {
                writeln!(out)?;
                writeln!(out, "👋 Tour closed. Press o to start again, q to quit.")?;
            }
            TourTransition::Unchanged => {}
        }
    }

    // Let a pending rewind finish before the runtime shuts down
    if tour.has_pending_reset() {
        tokio::time::sleep(config.tour.reset_delay()).await;
    }

    Ok(())
}
