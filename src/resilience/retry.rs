use tokio::time::{sleep, Duration};
use tracing::{error, warn};

use crate::config::settings::SessionConfig;

/// Count-based retry for transport failures.
///
/// `attempts` is the total number of tries, so `max_retries = 0` means a single call.
#[derive(Debug, Clone)]
pub struct RetrySettings {
    pub attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetrySettings {
    pub fn from_session(session: &SessionConfig) -> Self {
        let retry = session.retry.as_ref();
        Self {
            attempts: session.max_retries.saturating_add(1),
            base_delay_ms: retry.and_then(|r| r.base_delay_ms).unwrap_or(0),
            max_delay_ms: retry.and_then(|r| r.max_delay_ms).unwrap_or(0),
        }
    }

    /// Run `operation` until it succeeds, `should_retry` rejects the error, or attempts run out.
    pub async fn run_with_retry<F, Fut, T, E, P>(&self, mut operation: F, should_retry: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: std::fmt::Display,
        P: Fn(&E) -> bool,
    {
        let attempts = self.attempts.max(1);
        let mut delay = self.base_delay_ms;
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < attempts && should_retry(&e) => {
                    warn!("Attempt {attempt}/{attempts} failed: {e}");
                    if delay > 0 {
                        sleep(Duration::from_millis(delay)).await;
                    }
                    delay = (delay * 2).min(self.max_delay_ms.max(self.base_delay_ms));
                    attempt += 1;
                }
                Err(e) => {
                    if attempts > 1 {
                        error!("all {attempt} attempts failed: {e}");
                    }
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn settings(attempts: u32) -> RetrySettings {
        RetrySettings { attempts, base_delay_ms: 0, max_delay_ms: 0 }
    }

    #[tokio::test]
    async fn retries_until_success() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = settings(3)
            .run_with_retry(
                || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move { if n < 2 { Err("transient".to_owned()) } else { Ok(n) } }
                },
                |_| true,
            )
            .await;
        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_retryable_error_stops_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> = settings(5)
            .run_with_retry(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err("fatal".to_owned()) }
                },
                |_| false,
            )
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_retries_means_one_attempt() {
        let session = SessionConfig::default();
        assert_eq!(RetrySettings::from_session(&session).attempts, 1);
    }

    #[test]
    fn delay_is_off_without_a_retry_block() {
        let session = SessionConfig { max_retries: 3, ..SessionConfig::default() };
        let settings = RetrySettings::from_session(&session);
        assert_eq!(settings.attempts, 4);
        assert_eq!(settings.base_delay_ms, 0);
        assert_eq!(settings.max_delay_ms, 0);
    }
}
