//! Status command: one-shot view of the current session.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use punch_core::{Progress, TimeEntry, TrackerState, day_progress, format_hms, worked_duration};
use punch_session::{EntryGateway, TimeClock};

/// Machine-readable status payload for `--json`.
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    state: TrackerState,
    worked: String,
    progress: Progress,
    entry: Option<&'a TimeEntry>,
}

pub async fn run<W: Write, G: EntryGateway>(
    writer: &mut W,
    clock: &mut TimeClock<G>,
    json: bool,
    target_hours: f32,
) -> Result<()> {
    clock.refresh().await?;
    let now = Utc::now();
    if json {
        render_json(writer, clock.active_entry(), now, target_hours)
    } else {
        render(writer, clock.active_entry(), now, target_hours)
    }
}

/// Renders the human-readable status. Pure in `(entry, now)` so it can be
/// tested without a server or a real clock.
fn render<W: Write>(
    writer: &mut W,
    entry: Option<&TimeEntry>,
    now: DateTime<Utc>,
    target_hours: f32,
) -> Result<()> {
    let Some(entry) = entry else {
        writeln!(writer, "Not clocked in.")?;
        return Ok(());
    };

    let worked = worked_duration(entry, now);
    let break_minutes: i64 = entry.breaks.iter().map(|b| b.minutes_at(now)).sum();

    writeln!(writer, "Status: {}", TrackerState::of(Some(entry)))?;
    writeln!(
        writer,
        "Clocked in: {}",
        entry.clock_in.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    if let Some(running) = entry.running_break() {
        writeln!(
            writer,
            "On break since: {} ({})",
            running.break_start.format("%H:%M:%S"),
            running.break_type
        )?;
    }
    writeln!(writer, "Breaks: {} ({break_minutes} min)", entry.breaks.len())?;
    writeln!(writer, "Worked: {}", format_hms(worked))?;
    writeln!(writer, "Progress: {}", day_progress(worked, target_hours))?;
    Ok(())
}

fn render_json<W: Write>(
    writer: &mut W,
    entry: Option<&TimeEntry>,
    now: DateTime<Utc>,
    target_hours: f32,
) -> Result<()> {
    let worked = entry.map_or_else(chrono::Duration::zero, |e| worked_duration(e, now));
    let report = StatusReport {
        state: TrackerState::of(entry),
        worked: format_hms(worked),
        progress: day_progress(worked, target_hours),
        entry,
    };
    writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}
