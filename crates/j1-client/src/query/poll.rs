//! Bounded polling of a deferred query URL.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use j1_core::domain::query::{DeferredQueryStatus, DeferredStatus};
use j1_core::{J1Error, J1Result};

use crate::transport::{HttpRequest, HttpTransport};

/// Wait between polls of an in-progress query.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Overall wait before giving up on a query.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Limits for waiting on a deferred query.
///
/// Clearing both `max_attempts` and `timeout` waits until the service
/// reports a final state or the future is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
            timeout: Some(DEFAULT_POLL_TIMEOUT),
        }
    }
}

impl PollPolicy {
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            timeout: None,
            ..Self::default()
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Limit the number of status polls. The first poll always counts, so 0
    /// is rejected when polling starts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether another poll is allowed after `attempts` polls, `elapsed` in.
    fn allows_another(&self, attempts: u32, elapsed: Duration) -> bool {
        if self.max_attempts.is_some_and(|max| attempts >= max) {
            return false;
        }
        match self.timeout {
            Some(timeout) => elapsed + self.interval <= timeout,
            None => true,
        }
    }
}

/// Poll `url` until the service reports `FINISHED`.
///
/// Transport and status errors end the loop immediately. Any final state
/// other than `FINISHED` fails with [`J1Error::QueryFailed`]. A policy
/// allowing zero attempts fails with [`J1Error::Config`] before any request.
pub async fn poll_until_finished(
    http: &dyn HttpTransport,
    url: &str,
    policy: &PollPolicy,
) -> J1Result<DeferredQueryStatus> {
    if policy.max_attempts == Some(0) {
        return Err(J1Error::config("max poll attempts must be at least 1"));
    }

    let started = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let response = http
            .send(HttpRequest::get(url).unauthenticated())
            .await?
            .error_for_status()?;
        let deferred: DeferredQueryStatus = response.json()?;

        match deferred.status {
            DeferredStatus::Finished => {
                debug!(attempts, "Deferred query finished");
                return Ok(deferred);
            }
            DeferredStatus::Other(status) => return Err(J1Error::QueryFailed(status)),
            DeferredStatus::InProgress => {
                let elapsed = started.elapsed();
                if !policy.allows_another(attempts, elapsed) {
                    warn!(attempts, elapsed = ?elapsed, "Giving up on deferred query");
                    return Err(J1Error::Timeout { attempts, elapsed });
                }
                debug!(attempts, interval = ?policy.interval, "Deferred results in progress, sleeping");
                tokio::time::sleep(policy.interval).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(5));
        assert_eq!(policy.max_attempts, None);
        assert_eq!(policy.timeout, Some(Duration::from_secs(900)));
    }

    #[test]
    fn test_attempt_bound() {
        let policy = PollPolicy::unbounded().with_max_attempts(3);
        assert!(policy.allows_another(2, Duration::ZERO));
        assert!(!policy.allows_another(3, Duration::ZERO));
    }

    #[test]
    fn test_timeout_bound_counts_next_sleep() {
        let policy = PollPolicy::unbounded()
            .with_interval(Duration::from_secs(5))
            .with_timeout(Duration::from_secs(12));
        assert!(policy.allows_another(1, Duration::from_secs(5)));
        assert!(!policy.allows_another(2, Duration::from_secs(10)));
    }

    #[test]
    fn test_unbounded_always_allows() {
        assert!(PollPolicy::unbounded().allows_another(u32::MAX, Duration::from_secs(86_400)));
    }

    #[tokio::test]
    async fn test_zero_attempts_rejected_without_polling() {
        let http = crate::testing::ScriptedHttp::default();
        let policy = PollPolicy::default().with_max_attempts(0);
        let err = poll_until_finished(&http, "https://results.example/q", &policy)
            .await
            .unwrap_err();
        assert!(matches!(err, J1Error::Config(_)));
        assert!(http.requests().is_empty());
    }
}
