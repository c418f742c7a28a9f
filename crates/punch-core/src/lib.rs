//! Core domain logic for the punch time clock.
//!
//! This crate contains the fundamental types and logic for:
//! - Time entries and breaks: the work-session data model
//! - Lifecycle guards: which clock operations are legal in which state
//! - Worked-time arithmetic: gross minus breaks, progress toward a daily target
//! - Permissions: capability-set lookup with admin bypass

pub mod entry;
pub mod permission;
pub mod state;
pub mod types;
pub mod worked;

pub use entry::{Break, BreakType, EntryStatus, EntryType, TimeEntry, UnknownVariant};
pub use permission::{PermissionSet, Role, User, has_any_permission, has_permission};
pub use state::{
    GuardError, TrackerState, check_clock_in, check_clock_out, check_end_break, check_start_break,
};
pub use types::{BreakId, EntryId, OrgId, PermissionSlug, Progress, UserId, ValidationError};
pub use worked::{DEFAULT_TARGET_HOURS, day_progress, format_hms, worked_duration};
