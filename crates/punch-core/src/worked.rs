//! Worked-time arithmetic.
//!
//! Gross session time minus break time, plus the progress ratio toward a
//! daily target. Every function here is deterministic given `(entry, now)`;
//! the once-per-second tick that drives live display lives in the caller,
//! never here.

use chrono::{DateTime, Duration, Utc};

use crate::entry::TimeEntry;
use crate::types::Progress;

/// Default daily target used for the progress indicator.
pub const DEFAULT_TARGET_HOURS: f32 = 8.0;

/// Net worked duration of an entry as of `now`.
///
/// Gross duration since clock-in, minus break minutes: completed breaks
/// contribute their server-computed `duration_minutes`, a running break
/// contributes its live elapsed minutes (floored). The result is clamped
/// at zero so clock skew can never display a negative session.
#[must_use]
pub fn worked_duration(entry: &TimeEntry, now: DateTime<Utc>) -> Duration {
    let gross = now - entry.clock_in;
    let break_minutes: i64 = entry.breaks.iter().map(|b| b.minutes_at(now)).sum();
    let worked = gross - Duration::minutes(break_minutes);
    worked.max(Duration::zero())
}

/// Formats a duration as `HH:MM:SS`, floored to whole seconds.
///
/// Negative durations render as `00:00:00`.
#[must_use]
pub fn format_hms(duration: Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Progress toward the daily target, clamped to \[0, 1\].
#[expect(
    clippy::cast_precision_loss,
    reason = "worked seconds are far below f32 precision limits for a day"
)]
#[must_use]
pub fn day_progress(worked: Duration, target_hours: f32) -> Progress {
    if target_hours <= 0.0 {
        return Progress::MAX;
    }
    let worked_hours = worked.num_seconds().max(0) as f32 / 3600.0;
    Progress::clamped(worked_hours / target_hours)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::entry::{Break, BreakType, EntryStatus, EntryType};
    use crate::types::{BreakId, EntryId, OrgId, UserId};

    use super::*;

    fn ts(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, min, sec)
            .single()
            .expect("valid test timestamp")
    }

    fn open_entry(clock_in: DateTime<Utc>) -> TimeEntry {
        TimeEntry {
            id: EntryId::new("entry-1").unwrap(),
            user_id: UserId::new("user-1").unwrap(),
            organization_id: OrgId::new("org-1").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            clock_in,
            clock_out: None,
            total_worked_minutes: None,
            entry_type: EntryType::Regular,
            status: EntryStatus::Active,
            breaks: Vec::new(),
            notes: None,
            location: None,
        }
    }

    fn completed_break(start: DateTime<Utc>, end: DateTime<Utc>, minutes: i64) -> Break {
        Break {
            id: BreakId::new("break-1").unwrap(),
            time_entry_id: EntryId::new("entry-1").unwrap(),
            break_start: start,
            break_end: Some(end),
            duration_minutes: Some(minutes),
            break_type: BreakType::Meal,
        }
    }

    fn running_break(start: DateTime<Utc>) -> Break {
        Break {
            id: BreakId::new("break-2").unwrap(),
            time_entry_id: EntryId::new("entry-1").unwrap(),
            break_start: start,
            break_end: None,
            duration_minutes: None,
            break_type: BreakType::Rest,
        }
    }

    #[test]
    fn no_breaks_is_gross_duration() {
        let entry = open_entry(ts(9, 0, 0));
        let worked = worked_duration(&entry, ts(10, 30, 45));
        assert_eq!(format_hms(worked), "01:30:45");
    }

    #[test]
    fn elapsed_is_monotonic_without_running_break() {
        let mut entry = open_entry(ts(9, 0, 0));
        entry
            .breaks
            .push(completed_break(ts(9, 30, 0), ts(9, 45, 0), 15));

        let mut previous = Duration::zero();
        for minute in 0..120 {
            let now = ts(9, 0, 0) + Duration::minutes(minute);
            let worked = worked_duration(&entry, now);
            assert!(worked >= previous, "worked time went backwards at {now}");
            previous = worked;
        }
    }

    #[test]
    fn completed_break_is_subtracted() {
        // 09:00 clock-in, 15-minute completed break, now 10:00 -> 45 minutes
        let mut entry = open_entry(ts(9, 0, 0));
        entry
            .breaks
            .push(completed_break(ts(9, 15, 0), ts(9, 30, 0), 15));

        let worked = worked_duration(&entry, ts(10, 0, 0));
        assert_eq!(worked, Duration::minutes(45));
        assert_eq!(format_hms(worked), "00:45:00");
    }

    #[test]
    fn running_break_is_subtracted_live() {
        // 09:00 clock-in, break open since 09:30, now 09:45: gross is 45
        // minutes, the running break contributes 15, so 30 minutes worked.
        let mut entry = open_entry(ts(9, 0, 0));
        entry.breaks.push(running_break(ts(9, 30, 0)));

        let worked = worked_duration(&entry, ts(9, 45, 0));
        assert_eq!(worked, Duration::minutes(30));
        assert_eq!(format_hms(worked), "00:30:00");
    }

    #[test]
    fn running_break_freezes_worked_time() {
        // While a break runs, every live minute is also a break minute, so
        // the displayed worked time holds steady at its break-start value.
        let mut entry = open_entry(ts(9, 0, 0));
        entry.breaks.push(running_break(ts(9, 30, 0)));

        let at_break_start = worked_duration(&entry, ts(9, 30, 0));
        assert_eq!(at_break_start, Duration::minutes(30));
        for minute in [1, 5, 15, 45] {
            let now = ts(9, 30, 0) + Duration::minutes(minute);
            assert_eq!(worked_duration(&entry, now), at_break_start);
        }
    }

    #[test]
    fn full_day_scenario() {
        // Clock in 09:00, meal break 12:00-12:30 (30 min), now 13:00 -> 03:30:00
        let mut entry = open_entry(ts(9, 0, 0));
        entry
            .breaks
            .push(completed_break(ts(12, 0, 0), ts(12, 30, 0), 30));

        let worked = worked_duration(&entry, ts(13, 0, 0));
        assert_eq!(format_hms(worked), "03:30:00");
    }

    #[test]
    fn worked_duration_clamps_at_zero() {
        // Breaks longer than the session (server-rounded durations) must not
        // produce a negative display.
        let mut entry = open_entry(ts(9, 0, 0));
        entry
            .breaks
            .push(completed_break(ts(9, 0, 0), ts(9, 10, 0), 20));

        let worked = worked_duration(&entry, ts(9, 10, 0));
        assert_eq!(worked, Duration::zero());
        assert_eq!(format_hms(worked), "00:00:00");
    }

    #[test]
    fn format_hms_floors_to_whole_seconds() {
        assert_eq!(format_hms(Duration::milliseconds(61_900)), "00:01:01");
        assert_eq!(format_hms(Duration::seconds(-5)), "00:00:00");
        assert_eq!(format_hms(Duration::hours(27)), "27:00:00");
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact equality intended for clamp boundaries"
    )]
    fn progress_clamps_at_one() {
        // 10 hours against an 8-hour target is 100%, never 125%
        let progress = day_progress(Duration::hours(10), DEFAULT_TARGET_HOURS);
        assert_eq!(progress.value(), 1.0);
    }

    #[test]
    fn progress_is_proportional_below_target() {
        let progress = day_progress(Duration::hours(4), DEFAULT_TARGET_HOURS);
        assert!((progress.value() - 0.5).abs() < f32::EPSILON);

        let progress = day_progress(Duration::zero(), DEFAULT_TARGET_HOURS);
        assert!(progress.value().abs() < f32::EPSILON);
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact equality intended for clamp boundaries"
    )]
    fn progress_with_zero_target_is_full() {
        assert_eq!(day_progress(Duration::hours(1), 0.0).value(), 1.0);
    }
}
