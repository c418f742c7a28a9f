//! The gateway seam between the store and the transport.
//!
//! The store only needs the five lifecycle calls, so it works against this
//! trait rather than the concrete HTTP client. Tests substitute an
//! in-memory fake to prove that guarded rejections dispatch nothing.

use async_trait::async_trait;

use punch_api::{
    ApiError, Client, ClockInRequest, ClockOutRequest, EndBreakRequest, StartBreakRequest,
};
use punch_core::TimeEntry;

/// The five lifecycle calls the store dispatches.
#[async_trait]
pub trait EntryGateway: Send + Sync {
    /// Opens a new time entry.
    async fn clock_in(&self, request: &ClockInRequest) -> Result<TimeEntry, ApiError>;

    /// Closes the open time entry.
    async fn clock_out(&self, request: &ClockOutRequest) -> Result<TimeEntry, ApiError>;

    /// Starts a break on the open entry.
    async fn start_break(&self, request: &StartBreakRequest) -> Result<TimeEntry, ApiError>;

    /// Ends the running break.
    async fn end_break(&self, request: &EndBreakRequest) -> Result<TimeEntry, ApiError>;

    /// Fetches the current user's open entry, if any.
    async fn active_entry(&self) -> Result<Option<TimeEntry>, ApiError>;
}

#[async_trait]
impl EntryGateway for Client {
    async fn clock_in(&self, request: &ClockInRequest) -> Result<TimeEntry, ApiError> {
        Self::clock_in(self, request).await
    }

    async fn clock_out(&self, request: &ClockOutRequest) -> Result<TimeEntry, ApiError> {
        Self::clock_out(self, request).await
    }

    async fn start_break(&self, request: &StartBreakRequest) -> Result<TimeEntry, ApiError> {
        Self::start_break(self, request).await
    }

    async fn end_break(&self, request: &EndBreakRequest) -> Result<TimeEntry, ApiError> {
        Self::end_break(self, request).await
    }

    async fn active_entry(&self) -> Result<Option<TimeEntry>, ApiError> {
        Self::active_entry(self).await
    }
}
