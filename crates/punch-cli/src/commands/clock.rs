//! Clock-in and clock-out commands.

use std::io::Write;

use anyhow::Result;

use punch_core::EntryType;
use punch_session::{EntryGateway, TimeClock};

pub async fn clock_in<W: Write, G: EntryGateway>(
    writer: &mut W,
    clock: &mut TimeClock<G>,
    entry_type: EntryType,
    notes: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let entry = clock.clock_in(entry_type, notes, location).await?;
    writeln!(
        writer,
        "Clocked in at {} ({})",
        entry.clock_in.format("%H:%M:%S"),
        entry.entry_type
    )?;
    Ok(())
}

pub async fn clock_out<W: Write, G: EntryGateway>(
    writer: &mut W,
    clock: &mut TimeClock<G>,
    notes: Option<String>,
) -> Result<()> {
    let entry = clock.clock_out(notes).await?;
    // total_worked_minutes is filled in by the server on close
    if let Some(minutes) = entry.total_worked_minutes {
        writeln!(
            writer,
            "Clocked out. Worked {}h {:02}m today.",
            minutes / 60,
            minutes % 60
        )?;
    } else {
        writeln!(writer, "Clocked out.")?;
    }
    Ok(())
}
