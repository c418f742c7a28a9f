//! Retry with exponential backoff for idempotent API calls.
//!
//! Retries only on transient transport errors (connection failures,
//! timeouts). Non-2xx responses and deserialization failures are the
//! caller's concern and never trigger a retry. Mutating lifecycle calls
//! must not go through this path: a clock-in retried after an ambiguous
//! failure could create a second entry.

use std::time::Duration;

/// Retry policy for an idempotent request.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Backoff {
    /// Retry attempts after the initial request.
    max_retries: u32,
    /// Delay before the first retry; doubles on each further attempt.
    base_delay: Duration,
}

impl Default for Backoff {
    /// Three retries at 200ms, 400ms, 800ms.
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl Backoff {
    #[cfg(test)]
    const fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Sends a request, retrying transport errors under this policy.
    ///
    /// The closure `f` is called up to `max_retries + 1` times. Only
    /// [`reqwest::Error`] transport failures trigger a retry — the caller
    /// is responsible for inspecting the response status code.
    pub(crate) async fn send<F, Fut>(self, f: F) -> Result<reqwest::Response, reqwest::Error>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        // Retry attempts with backoff, then one final attempt without retry.
        for attempt in 0..self.max_retries {
            match f().await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let delay = self.base_delay * 2u32.pow(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        "active-entry fetch failed, retrying in {delay:?}: {e}"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
        // Final attempt, no more retries.
        f().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    /// Counts how many times a request against a guaranteed-closed port is
    /// attempted under the given policy.
    async fn attempts_against_closed_port(policy: Backoff) -> u32 {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = call_count.clone();

        let result = policy
            .send(|| {
                let cc = cc.clone();
                async move {
                    cc.fetch_add(1, Ordering::SeqCst);
                    reqwest::Client::builder()
                        .timeout(Duration::from_millis(50))
                        .build()
                        .unwrap()
                        .get("http://127.0.0.1:1/")
                        .send()
                        .await
                }
            })
            .await;

        assert!(result.is_err(), "request to closed port must fail");
        call_count.load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn exhausts_all_attempts_on_transport_failure() {
        let policy = Backoff::new(2, Duration::from_millis(10));
        assert_eq!(
            attempts_against_closed_port(policy).await,
            3,
            "two retries plus the final attempt"
        );
    }

    #[tokio::test]
    async fn zero_retries_means_a_single_attempt() {
        let policy = Backoff::new(0, Duration::from_millis(10));
        assert_eq!(attempts_against_closed_port(policy).await, 1);
    }

    #[tokio::test]
    async fn first_success_short_circuits() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let calls = Arc::new(AtomicU32::new(0));
        let cc = calls.clone();
        let uri = server.uri();
        let response = Backoff::default()
            .send(|| {
                let cc = cc.clone();
                let uri = uri.clone();
                async move {
                    cc.fetch_add(1, Ordering::SeqCst);
                    reqwest::get(uri).await
                }
            })
            .await
            .expect("request succeeds");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
