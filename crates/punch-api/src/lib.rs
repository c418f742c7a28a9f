//! Time-entry REST API client.
//!
//! A thin typed wrapper over the backend's lifecycle endpoints. Every
//! response body is the server's authoritative [`TimeEntry`]; the client
//! never computes durations itself. Only the read-only active-entry fetch
//! is retried on transport failure — mutating calls surface their first
//! error so a retried clock-in can never double-create an entry.

mod retry;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use punch_core::{BreakId, BreakType, EntryId, EntryType, TimeEntry};

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The provided bearer token was invalid.
    #[error("invalid bearer token: {reason}")]
    InvalidToken { reason: &'static str },
    /// The provided base URL was invalid.
    #[error("invalid base URL: {reason}")]
    InvalidBaseUrl { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP transport failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server rejected the request; the message is propagated verbatim.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Body for `POST /time-entries/clock-in`.
#[derive(Debug, Clone, Serialize)]
pub struct ClockInRequest {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Body for `POST /time-entries/clock-out`.
#[derive(Debug, Clone, Serialize)]
pub struct ClockOutRequest {
    pub time_entry_id: EntryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for `POST /time-entries/break/start`.
#[derive(Debug, Clone, Serialize)]
pub struct StartBreakRequest {
    pub time_entry_id: EntryId,
    #[serde(rename = "type")]
    pub break_type: BreakType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for `POST /time-entries/break/end`.
#[derive(Debug, Clone, Serialize)]
pub struct EndBreakRequest {
    pub break_id: BreakId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Time-entry API client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client for the given API base URL and bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or token is empty or
    /// whitespace-only, or if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let token = token.into();

        if base_url.trim().is_empty() {
            return Err(ApiError::InvalidBaseUrl {
                reason: "base URL cannot be empty",
            });
        }
        if token.is_empty() {
            return Err(ApiError::InvalidToken {
                reason: "token cannot be empty",
            });
        }
        if token.trim().is_empty() {
            return Err(ApiError::InvalidToken {
                reason: "token cannot be whitespace-only",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Opens a new time entry. `POST /time-entries/clock-in`.
    pub async fn clock_in(&self, request: &ClockInRequest) -> Result<TimeEntry, ApiError> {
        self.post_entry("/time-entries/clock-in", request).await
    }

    /// Closes the open time entry. `POST /time-entries/clock-out`.
    ///
    /// The returned entry carries the server-computed
    /// `total_worked_minutes`.
    pub async fn clock_out(&self, request: &ClockOutRequest) -> Result<TimeEntry, ApiError> {
        self.post_entry("/time-entries/clock-out", request).await
    }

    /// Starts a break on the open entry. `POST /time-entries/break/start`.
    pub async fn start_break(&self, request: &StartBreakRequest) -> Result<TimeEntry, ApiError> {
        self.post_entry("/time-entries/break/start", request).await
    }

    /// Ends the running break. `POST /time-entries/break/end`.
    ///
    /// The returned entry carries the break's server-computed
    /// `duration_minutes`.
    pub async fn end_break(&self, request: &EndBreakRequest) -> Result<TimeEntry, ApiError> {
        self.post_entry("/time-entries/break/end", request).await
    }

    /// Fetches the current user's open entry, if any.
    /// `GET /time-entries/active`.
    ///
    /// "No active entry" is signalled as 200 with a JSON `null` body or as
    /// 204 No Content; both map to `None`. This call is idempotent, so
    /// transport failures are retried with capped exponential backoff.
    pub async fn active_entry(&self) -> Result<Option<TimeEntry>, ApiError> {
        let url = format!("{}/time-entries/active", self.base_url);
        let response = retry::Backoff::default().send(|| {
            self.http
                .get(&url)
                .header("Authorization", format!("Bearer {}", self.token))
                .send()
        })
        .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }

        serde_json::from_str::<Option<TimeEntry>>(&body)
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    async fn post_entry<T: Serialize + fmt::Debug>(
        &self,
        path: &str,
        request: &T,
    ) -> Result<TimeEntry, ApiError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, ?request, "dispatching lifecycle call");

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let err = error_from_body(status.as_u16(), &body);
            tracing::warn!(%url, status = status.as_u16(), "lifecycle call rejected");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }
}

/// Maps an error response body to [`ApiError::Api`].
///
/// Bodies of the shape `{"message": "..."}` propagate the message verbatim;
/// anything else falls back to the raw body.
fn error_from_body(status: u16, body: &str) -> ApiError {
    #[derive(Deserialize)]
    struct ErrorPayload {
        message: String,
    }

    let message = serde_json::from_str::<ErrorPayload>(body)
        .map_or_else(|_| body.to_string(), |payload| payload.message);
    ApiError::Api { status, message }
}
