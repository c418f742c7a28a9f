//! The active-entry store.
//!
//! [`TimeClock`] owns the single in-memory reference to the user's open
//! time entry and drives the lifecycle state machine over it. Transitions
//! are guarded locally before dispatch, serialized by `&mut self` plus the
//! loading flag, and the in-memory entry is replaced only by the server's
//! authoritative response — no optimistic mutation, so server-computed
//! durations can never drift.
//!
//! Read-only consumers (status lines, live tickers) observe the store
//! through [`Snapshot`] values on a `tokio::sync::watch` channel; they
//! never touch the store itself.

mod gateway;

pub use gateway::EntryGateway;

use thiserror::Error;
use tokio::sync::watch;

use punch_api::{
    ApiError, ClockInRequest, ClockOutRequest, EndBreakRequest, StartBreakRequest,
};
use punch_core::{
    BreakId, BreakType, EntryType, GuardError, TimeEntry, TrackerState, check_clock_in,
    check_clock_out, check_end_break, check_start_break,
};

/// Store errors.
#[derive(Debug, Error)]
pub enum ClockError {
    /// A local precondition failed; nothing was dispatched.
    #[error(transparent)]
    Guard(#[from] GuardError),

    /// The dispatch failed; the store state is unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A prior operation is still in flight.
    #[error("another operation is still in flight")]
    Busy,
}

/// Immutable copy of the store's observable fields, published to `watch`
/// subscribers on every mutation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub state: TrackerState,
    pub active: Option<TimeEntry>,
    pub loading: bool,
    pub last_error: Option<String>,
}

/// The active-entry store and lifecycle state machine.
///
/// Constructed empty at application start, populated by [`refresh`] on
/// authentication, cleared by [`reset`] on logout or by a successful
/// clock-out. Only the lifecycle methods mutate it.
///
/// [`refresh`]: TimeClock::refresh
/// [`reset`]: TimeClock::reset
#[derive(Debug)]
pub struct TimeClock<G> {
    gateway: G,
    active: Option<TimeEntry>,
    loading: bool,
    last_error: Option<String>,
    tx: watch::Sender<Snapshot>,
}

impl<G: EntryGateway> TimeClock<G> {
    /// Creates an empty store over the given gateway.
    pub fn new(gateway: G) -> Self {
        let (tx, _rx) = watch::channel(Snapshot::default());
        Self {
            gateway,
            active: None,
            loading: false,
            last_error: None,
            tx,
        }
    }

    /// The open entry, if any.
    #[must_use]
    pub const fn active_entry(&self) -> Option<&TimeEntry> {
        self.active.as_ref()
    }

    /// The current lifecycle state, derived from the active entry.
    #[must_use]
    pub fn state(&self) -> TrackerState {
        TrackerState::of(self.active.as_ref())
    }

    /// True while a dispatch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last failure message, until dismissed or superseded.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Subscribes a read-only observer to store snapshots.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// Dismisses the last failure message.
    pub fn clear_error(&mut self) {
        self.last_error = None;
        self.publish();
    }

    /// Clears the store to its unauthenticated state (logout).
    pub fn reset(&mut self) {
        self.active = None;
        self.loading = false;
        self.last_error = None;
        self.publish();
    }

    /// Clocks in, opening a new entry.
    pub async fn clock_in(
        &mut self,
        entry_type: EntryType,
        notes: Option<String>,
        location: Option<String>,
    ) -> Result<TimeEntry, ClockError> {
        self.guard(check_clock_in(self.active.as_ref()))?;
        let request = ClockInRequest {
            entry_type,
            notes,
            location,
        };

        self.begin();
        match self.gateway.clock_in(&request).await {
            Ok(entry) => {
                tracing::debug!(entry_id = %entry.id, state = %TrackerState::Working, "clocked in");
                self.active = Some(entry.clone());
                self.settle(None);
                Ok(entry)
            }
            Err(err) => {
                tracing::warn!(error = %err, "clock-in failed");
                self.settle(Some(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Clocks out, closing the open entry.
    ///
    /// Forbidden while a break is running. On success the entry leaves the
    /// active slot and the server-closed entry (with its computed
    /// `total_worked_minutes`) is returned as historical data.
    pub async fn clock_out(&mut self, notes: Option<String>) -> Result<TimeEntry, ClockError> {
        self.guard(check_clock_out(self.active.as_ref()))?;
        let entry = self.active.as_ref().ok_or(GuardError::NoActiveEntry)?;
        let request = ClockOutRequest {
            time_entry_id: entry.id.clone(),
            notes,
        };

        self.begin();
        match self.gateway.clock_out(&request).await {
            Ok(closed) => {
                tracing::debug!(entry_id = %closed.id, state = %TrackerState::Idle, "clocked out");
                self.active = None;
                self.settle(None);
                Ok(closed)
            }
            Err(err) => {
                tracing::warn!(error = %err, "clock-out failed");
                self.settle(Some(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Starts a break on the open entry.
    pub async fn start_break(
        &mut self,
        break_type: BreakType,
        notes: Option<String>,
    ) -> Result<TimeEntry, ClockError> {
        self.guard(check_start_break(self.active.as_ref()))?;
        let entry = self.active.as_ref().ok_or(GuardError::NoActiveEntry)?;
        let request = StartBreakRequest {
            time_entry_id: entry.id.clone(),
            break_type,
            notes,
        };

        self.begin();
        match self.gateway.start_break(&request).await {
            Ok(entry) => {
                let break_id = entry.running_break().map(|b| b.id.to_string());
                tracing::debug!(
                    entry_id = %entry.id,
                    break_id = break_id.as_deref(),
                    state = %TrackerState::OnBreak,
                    "break started"
                );
                self.active = Some(entry.clone());
                self.settle(None);
                Ok(entry)
            }
            Err(err) => {
                tracing::warn!(error = %err, "break-start failed");
                self.settle(Some(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Ends the running break.
    ///
    /// `break_id` must name the running break; ending an already-ended or
    /// unknown break is a precondition violation.
    pub async fn end_break(
        &mut self,
        break_id: BreakId,
        notes: Option<String>,
    ) -> Result<TimeEntry, ClockError> {
        self.guard(check_end_break(self.active.as_ref(), &break_id))?;
        let request = EndBreakRequest {
            break_id: break_id.clone(),
            notes,
        };

        self.begin();
        match self.gateway.end_break(&request).await {
            Ok(entry) => {
                tracing::debug!(
                    entry_id = %entry.id,
                    break_id = %break_id,
                    state = %TrackerState::Working,
                    "break ended"
                );
                self.active = Some(entry.clone());
                self.settle(None);
                Ok(entry)
            }
            Err(err) => {
                tracing::warn!(error = %err, break_id = %break_id, "break-end failed");
                self.settle(Some(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Re-fetches the authoritative active entry from the server.
    ///
    /// Idempotent: with no intervening mutation and unchanged server state,
    /// repeated calls yield the same value.
    pub async fn refresh(&mut self) -> Result<Option<TimeEntry>, ClockError> {
        if self.loading {
            return Err(ClockError::Busy);
        }

        self.begin();
        match self.gateway.active_entry().await {
            Ok(entry) => {
                self.active = entry.clone();
                self.settle(None);
                Ok(entry)
            }
            Err(err) => {
                tracing::warn!(error = %err, "active-entry refresh failed");
                self.settle(Some(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Runs a local precondition check, recording the failure message.
    fn guard(&mut self, check: Result<(), GuardError>) -> Result<(), ClockError> {
        if self.loading {
            return Err(ClockError::Busy);
        }
        if let Err(err) = check {
            self.last_error = Some(err.to_string());
            self.publish();
            return Err(err.into());
        }
        Ok(())
    }

    fn begin(&mut self) {
        self.loading = true;
        self.publish();
    }

    fn settle(&mut self, error: Option<String>) {
        self.loading = false;
        self.last_error = error;
        self.publish();
    }

    fn publish(&self) {
        self.tx.send_replace(Snapshot {
            state: self.state(),
            active: self.active.clone(),
            loading: self.loading,
            last_error: self.last_error.clone(),
        });
    }
}
