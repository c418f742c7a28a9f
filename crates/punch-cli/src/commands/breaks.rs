//! Break start and end commands.

use std::io::Write;

use anyhow::{Context, Result, bail};

use punch_core::{BreakId, BreakType, TimeEntry};
use punch_session::{EntryGateway, TimeClock};

pub async fn start<W: Write, G: EntryGateway>(
    writer: &mut W,
    clock: &mut TimeClock<G>,
    break_type: BreakType,
    notes: Option<String>,
) -> Result<()> {
    let entry = clock.start_break(break_type, notes).await?;
    let running = entry
        .running_break()
        .context("server returned no running break")?;
    writeln!(
        writer,
        "Break started at {} ({})",
        running.break_start.format("%H:%M:%S"),
        running.break_type
    )?;
    Ok(())
}

pub async fn end<W: Write, G: EntryGateway>(
    writer: &mut W,
    clock: &mut TimeClock<G>,
    id: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let break_id = match id {
        Some(raw) => BreakId::new(raw)?,
        None => match clock.active_entry().and_then(TimeEntry::running_break) {
            Some(running) => running.id.clone(),
            None => bail!("no break is in progress"),
        },
    };

    let entry = clock.end_break(break_id.clone(), notes).await?;
    let ended = entry.breaks.iter().find(|b| b.id == break_id);
    // duration_minutes is filled in by the server on break end
    if let Some(minutes) = ended.and_then(|b| b.duration_minutes) {
        writeln!(writer, "Break ended after {minutes} min.")?;
    } else {
        writeln!(writer, "Break ended.")?;
    }
    Ok(())
}
