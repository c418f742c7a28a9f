//! Watch command: live once-per-second elapsed-time display.
//!
//! The tick only re-renders; all arithmetic is the pure worked-time
//! computation over the last published snapshot, so the display can never
//! drift from the store.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::time::{Duration, MissedTickBehavior};

use punch_core::{TimeEntry, TrackerState, day_progress, format_hms, worked_duration};
use punch_session::{EntryGateway, TimeClock};

/// Seconds between authoritative re-fetches, so a clock-out or break made
/// from another client shows up in the live display.
const REFRESH_EVERY_SECS: u64 = 30;

pub async fn run<W: Write, G: EntryGateway>(
    writer: &mut W,
    clock: &mut TimeClock<G>,
    target_hours: f32,
) -> Result<()> {
    clock.refresh().await?;
    let rx = clock.subscribe();

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut ticks: u64 = 0;

    loop {
        interval.tick().await;
        ticks += 1;
        if ticks % REFRESH_EVERY_SECS == 0 {
            // Best effort: on failure the ticker keeps the last snapshot
            // and the next cycle tries again.
            let _ = clock.refresh().await;
        }

        let snapshot = rx.borrow().clone();
        let Some(entry) = snapshot.active.as_ref() else {
            writeln!(writer, "Not clocked in.")?;
            return Ok(());
        };
        write!(writer, "\r{}", ticker_line(entry, Utc::now(), target_hours))?;
        writer.flush()?;
    }
}

/// One line of the live display, deterministic in `(entry, now)`.
fn ticker_line(entry: &TimeEntry, now: DateTime<Utc>, target_hours: f32) -> String {
    let worked = worked_duration(entry, now);
    format!(
        "{:<8} {}  {}",
        TrackerState::of(Some(entry)).to_string(),
        format_hms(worked),
        day_progress(worked, target_hours)
    )
}
