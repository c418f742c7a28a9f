//! Time entries and breaks: the work-session data model.
//!
//! Field names mirror the wire format of the time-entry API; the JSON key
//! `type` maps to [`EntryType`] / [`BreakType`]. Durations
//! (`total_worked_minutes`, `duration_minutes`) are always server-computed
//! and never filled in by the client.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{BreakId, EntryId, OrgId, UserId};

/// Error type for unknown enum variant strings.
#[derive(Debug, Clone)]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Generates a wire-format enum with string conversions as the single
/// source of truth for variant names.
macro_rules! define_wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// String representation on the wire.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

define_wire_enum!(
    /// The kind of work session.
    EntryType, "entry type" {
        Regular => "regular",
        Overtime => "overtime",
        Remote => "remote",
        OnSite => "on_site",
    }
);

define_wire_enum!(
    /// Where a time entry is in its approval lifecycle.
    EntryStatus, "entry status" {
        Active => "active",
        Completed => "completed",
        Approved => "approved",
        Rejected => "rejected",
    }
);

define_wire_enum!(
    /// The kind of break.
    BreakType, "break type" {
        Meal => "meal",
        Rest => "rest",
        Personal => "personal",
        Other => "other",
    }
);

/// A single clock-in/clock-out work session for one user on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier, minted by the backend.
    pub id: EntryId,
    /// The user this entry belongs to.
    pub user_id: UserId,
    /// The organization this entry belongs to.
    pub organization_id: OrgId,
    /// Calendar day the entry belongs to.
    pub date: NaiveDate,
    /// When the user clocked in. Immutable after creation.
    pub clock_in: DateTime<Utc>,
    /// When the user clocked out; `None` while the entry is still open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<DateTime<Utc>>,
    /// Total worked minutes, computed by the backend once the entry closes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_worked_minutes: Option<i64>,
    /// The kind of work session.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Approval lifecycle status.
    pub status: EntryStatus,
    /// Breaks taken during this entry, in chronological order.
    #[serde(default)]
    pub breaks: Vec<Break>,
    /// Optional free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Optional free-text location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl TimeEntry {
    /// Returns true while the entry has no clock-out timestamp.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Returns the currently running break, if any.
    ///
    /// The backend guarantees at most one break per entry has no end
    /// timestamp, so the first match is the running one.
    #[must_use]
    pub fn running_break(&self) -> Option<&Break> {
        self.breaks.iter().find(|b| b.break_end.is_none())
    }
}

/// A bounded pause within an active time entry, subtracted from worked time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Break {
    /// Unique identifier, minted by the backend.
    pub id: BreakId,
    /// The entry this break belongs to.
    pub time_entry_id: EntryId,
    /// When the break started.
    pub break_start: DateTime<Utc>,
    /// When the break ended; `None` while the break is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_end: Option<DateTime<Utc>>,
    /// Break length in minutes, computed by the backend once the break ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    /// The kind of break.
    #[serde(rename = "type")]
    pub break_type: BreakType,
}

impl Break {
    /// Returns true while the break has no end timestamp.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.break_end.is_none()
    }

    /// Minutes this break contributes to the break total as of `now`.
    ///
    /// Completed breaks use the server-computed duration; a running break
    /// counts live, floored to whole minutes and never negative.
    #[must_use]
    pub fn minutes_at(&self, now: DateTime<Utc>) -> i64 {
        if let Some(minutes) = self.duration_minutes {
            minutes
        } else if self.break_end.is_none() {
            (now - self.break_start).num_minutes().max(0)
        } else {
            0
        }
    }
}
