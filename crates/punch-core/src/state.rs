//! Lifecycle state derivation and transition guards.
//!
//! The tracker state is derived purely from the active entry; it is never
//! stored separately, so it cannot drift from the data. Guards are checked
//! locally before any network dispatch. The server remains the final
//! authority: a guard passing here does not exempt the caller from handling
//! a server-side rejection of the same condition.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entry::TimeEntry;
use crate::types::BreakId;

/// Precondition violations for lifecycle operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// A mutating call requires an open entry and none exists.
    #[error("no active time entry")]
    NoActiveEntry,

    /// Clock-in attempted while an entry is already open.
    #[error("a time entry is already active")]
    AlreadyClockedIn,

    /// Break-start attempted while a break is already running.
    #[error("a break is already in progress")]
    BreakInProgress,

    /// Break-end attempted with no running break.
    #[error("no break is in progress")]
    NoBreakInProgress,

    /// Break-end attempted for a break that is not the running one.
    #[error("break {0} is not the running break")]
    NotTheRunningBreak(BreakId),

    /// Clock-out attempted while a break is running.
    #[error("cannot clock out while a break is in progress")]
    ClockOutDuringBreak,
}

/// Where the user is in the work-session lifecycle.
///
/// Derived from the active entry; `Closed` entries leave the active slot
/// entirely and become historical data, so they never appear here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerState {
    /// No open time entry exists.
    #[default]
    Idle,
    /// An entry is open and no break is running.
    Working,
    /// An entry is open and exactly one break is running.
    OnBreak,
}

impl TrackerState {
    /// Derives the state from the active-entry slot.
    #[must_use]
    pub fn of(entry: Option<&TimeEntry>) -> Self {
        match entry {
            None => Self::Idle,
            Some(e) if e.running_break().is_some() => Self::OnBreak,
            Some(_) => Self::Working,
        }
    }
}

impl fmt::Display for TrackerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Working => "working",
            Self::OnBreak => "on break",
        };
        write!(f, "{s}")
    }
}

/// Guard for clock-in: no entry may be open.
pub fn check_clock_in(entry: Option<&TimeEntry>) -> Result<(), GuardError> {
    match entry {
        None => Ok(()),
        Some(_) => Err(GuardError::AlreadyClockedIn),
    }
}

/// Guard for clock-out: an entry must be open and no break running.
pub fn check_clock_out(entry: Option<&TimeEntry>) -> Result<(), GuardError> {
    let entry = entry.ok_or(GuardError::NoActiveEntry)?;
    if entry.running_break().is_some() {
        return Err(GuardError::ClockOutDuringBreak);
    }
    Ok(())
}

/// Guard for break-start: an entry must be open and no break running.
pub fn check_start_break(entry: Option<&TimeEntry>) -> Result<(), GuardError> {
    let entry = entry.ok_or(GuardError::NoActiveEntry)?;
    if entry.running_break().is_some() {
        return Err(GuardError::BreakInProgress);
    }
    Ok(())
}

/// Guard for break-end: the named break must be the running one.
pub fn check_end_break(entry: Option<&TimeEntry>, break_id: &BreakId) -> Result<(), GuardError> {
    let entry = entry.ok_or(GuardError::NoActiveEntry)?;
    let running = entry.running_break().ok_or(GuardError::NoBreakInProgress)?;
    if running.id != *break_id {
        return Err(GuardError::NotTheRunningBreak(break_id.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::entry::{Break, BreakType, EntryStatus, EntryType};
    use crate::types::{EntryId, OrgId, UserId};

    use super::*;

    fn working_entry() -> TimeEntry {
        TimeEntry {
            id: EntryId::new("entry-1").unwrap(),
            user_id: UserId::new("user-1").unwrap(),
            organization_id: OrgId::new("org-1").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            clock_in: Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
            clock_out: None,
            total_worked_minutes: None,
            entry_type: EntryType::Regular,
            status: EntryStatus::Active,
            breaks: Vec::new(),
            notes: None,
            location: None,
        }
    }

    fn on_break_entry() -> TimeEntry {
        let mut entry = working_entry();
        entry.breaks.push(Break {
            id: BreakId::new("break-1").unwrap(),
            time_entry_id: entry.id.clone(),
            break_start: Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
            break_end: None,
            duration_minutes: None,
            break_type: BreakType::Meal,
        });
        entry
    }

    #[test]
    fn state_derivation() {
        assert_eq!(TrackerState::of(None), TrackerState::Idle);
        assert_eq!(TrackerState::of(Some(&working_entry())), TrackerState::Working);
        assert_eq!(TrackerState::of(Some(&on_break_entry())), TrackerState::OnBreak);
    }

    #[test]
    fn clock_in_requires_idle() {
        assert!(check_clock_in(None).is_ok());
        assert_eq!(
            check_clock_in(Some(&working_entry())),
            Err(GuardError::AlreadyClockedIn)
        );
        assert_eq!(
            check_clock_in(Some(&on_break_entry())),
            Err(GuardError::AlreadyClockedIn)
        );
    }

    #[test]
    fn clock_out_forbidden_on_break() {
        assert!(check_clock_out(Some(&working_entry())).is_ok());
        assert_eq!(
            check_clock_out(Some(&on_break_entry())),
            Err(GuardError::ClockOutDuringBreak)
        );
        assert_eq!(check_clock_out(None), Err(GuardError::NoActiveEntry));
    }

    #[test]
    fn start_break_forbidden_while_on_break() {
        assert!(check_start_break(Some(&working_entry())).is_ok());
        assert_eq!(
            check_start_break(Some(&on_break_entry())),
            Err(GuardError::BreakInProgress)
        );
        assert_eq!(check_start_break(None), Err(GuardError::NoActiveEntry));
    }

    #[test]
    fn end_break_requires_the_running_break() {
        let running_id = BreakId::new("break-1").unwrap();
        let other_id = BreakId::new("break-9").unwrap();

        assert!(check_end_break(Some(&on_break_entry()), &running_id).is_ok());
        assert_eq!(
            check_end_break(Some(&on_break_entry()), &other_id),
            Err(GuardError::NotTheRunningBreak(other_id))
        );
        assert_eq!(
            check_end_break(Some(&working_entry()), &running_id),
            Err(GuardError::NoBreakInProgress)
        );
        assert_eq!(
            check_end_break(None, &running_id),
            Err(GuardError::NoActiveEntry)
        );
    }
}
