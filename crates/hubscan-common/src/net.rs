//! Page fetching for live search mode.
//!
//! Provides a blocking HTTP GET with a fixed retry/backoff ladder. The retry
//! loop itself is independent of HTTP so it can be driven by tests.
//!
//! Retry taxonomy:
//! - transport failures, unreadable bodies, status 429 and any 5xx are retried
//! - any other non-success status is terminal
//! - running out of retries is terminal
use std::thread;
use std::time::Duration;

use thiserror::Error;

/// User-Agent header sent with all requests.
pub const USER_AGENT: &str = concat!("hubscan/", env!("CARGO_PKG_VERSION"));

/// Default request timeout, applied to both connecting and the whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default number of retries after the first attempt.
pub const DEFAULT_RETRIES: u32 = 3;

/// Delays slept before the first, second and third retry. Later retries reuse
/// the last step.
pub const BACKOFF_LADDER: [Duration; 3] = [
    Duration::from_millis(200),
    Duration::from_millis(600),
    Duration::from_millis(1200),
];

/// Why a page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
    /// The request failed before a status line arrived.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("HTTP error: {code}")]
    Status {
        /// Numeric HTTP status.
        code: u16,
    },
    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
    /// A retryable failure persisted through every retry.
    #[error("giving up after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Total attempts made, the first one included.
        attempts: u32,
        /// The failure of the final attempt.
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Whether another attempt could plausibly succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Body(_) => true,
            Self::Status { code } => *code == 429 || *code >= 500,
            Self::Client(_) | Self::RetriesExhausted { .. } => false,
        }
    }
}

/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub retries: u32,
    /// Escalating delays; the last one repeats once the ladder runs out.
    pub backoff: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            backoff: BACKOFF_LADDER.to_vec(),
        }
    }
}

impl RetryPolicy {
    /// Delay to sleep before retry number `retry` (zero-based).
    #[must_use]
    pub fn delay_before(&self, retry: u32) -> Duration {
        let index = usize::try_from(retry).unwrap_or(usize::MAX);
        self.backoff
            .get(index)
            .or_else(|| self.backoff.last())
            .copied()
            .unwrap_or_default()
    }
}

/// Run `attempt` until it succeeds, fails terminally, or retries run out.
///
/// `attempt` receives the zero-based attempt number. `sleep` is called with the
/// backoff delay before every retry.
///
/// # Errors
///
/// Returns the terminal error unchanged, or [`FetchError::RetriesExhausted`]
/// wrapping the last retryable error.
pub fn retry_with_backoff<T>(
    policy: &RetryPolicy,
    mut attempt: impl FnMut(u32) -> Result<T, FetchError>,
    mut sleep: impl FnMut(Duration),
) -> Result<T, FetchError> {
    let mut tried = 0;
    loop {
        match attempt(tried) {
            Ok(value) => return Ok(value),
            Err(error) if !error.is_retryable() => return Err(error),
            Err(error) if tried >= policy.retries => {
                return Err(FetchError::RetriesExhausted {
                    attempts: tried + 1,
                    last: Box::new(error),
                });
            }
            Err(error) => {
                let delay = policy.delay_before(tried);
                tracing::warn!(
                    attempt = tried + 1,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    %error,
                    "fetch failed, retrying"
                );
                sleep(delay);
                tried += 1;
            }
        }
    }
}

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Connect and total request timeout.
    pub timeout: Duration,
    /// Value of the User-Agent header.
    pub user_agent: String,
    /// Retry behaviour for retryable failures.
    pub retry: RetryPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Something that can turn a URL into the bytes of a page.
pub trait PageFetcher {
    /// Fetch `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] once the fetch has failed irrecoverably.
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP fetcher with retry and backoff.
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Build a fetcher. Redirects are followed and compressed bodies accepted.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be created.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// One attempt, no retries.
    fn fetch_once(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url, "fetching page");
        retry_with_backoff(&self.config.retry, |_| self.fetch_once(url), thread::sleep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_sleep(_: Duration) {}

    #[test]
    fn status_taxonomy() {
        assert!(FetchError::Status { code: 429 }.is_retryable());
        assert!(FetchError::Status { code: 500 }.is_retryable());
        assert!(FetchError::Status { code: 503 }.is_retryable());
        assert!(FetchError::Transport("reset".into()).is_retryable());
        assert!(!FetchError::Status { code: 404 }.is_retryable());
        assert!(!FetchError::Status { code: 403 }.is_retryable());
        assert!(!FetchError::Client("tls".into()).is_retryable());
    }

    #[test]
    fn backoff_reuses_the_longest_delay() {
        let policy = RetryPolicy {
            retries: 5,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.delay_before(0), Duration::from_millis(200));
        assert_eq!(policy.delay_before(1), Duration::from_millis(600));
        assert_eq!(policy.delay_before(2), Duration::from_millis(1200));
        assert_eq!(policy.delay_before(3), Duration::from_millis(1200));
        assert_eq!(policy.delay_before(10), Duration::from_millis(1200));
    }

    #[test]
    fn retries_then_succeeds() {
        let mut slept = Vec::new();
        let result = retry_with_backoff(
            &RetryPolicy::default(),
            |n| {
                if n < 2 {
                    Err(FetchError::Status { code: 503 })
                } else {
                    Ok(n)
                }
            },
            |d| slept.push(d),
        );
        assert_eq!(result.ok(), Some(2));
        assert_eq!(
            slept,
            vec![Duration::from_millis(200), Duration::from_millis(600)]
        );
    }

    #[test]
    fn client_error_is_not_retried() {
        let mut calls = 0;
        let result: Result<(), _> = retry_with_backoff(
            &RetryPolicy::default(),
            |_| {
                calls += 1;
                Err(FetchError::Status { code: 404 })
            },
            no_sleep,
        );
        assert!(matches!(result, Err(FetchError::Status { code: 404 })));
        assert_eq!(calls, 1);
    }

    #[test]
    fn exhausted_retries_are_terminal() {
        let mut calls = 0;
        let result: Result<(), _> = retry_with_backoff(
            &RetryPolicy::default(),
            |_| {
                calls += 1;
                Err(FetchError::Transport("connection refused".into()))
            },
            no_sleep,
        );
        match result {
            Err(FetchError::RetriesExhausted { attempts, last }) => {
                assert_eq!(attempts, 4);
                assert!(matches!(*last, FetchError::Transport(_)));
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
        assert_eq!(calls, 4);
    }

    #[test]
    fn zero_retries_means_one_attempt() {
        let policy = RetryPolicy {
            retries: 0,
            ..RetryPolicy::default()
        };
        let mut calls = 0;
        let result: Result<(), _> = retry_with_backoff(
            &policy,
            |_| {
                calls += 1;
                Err(FetchError::Status { code: 429 })
            },
            no_sleep,
        );
        assert!(matches!(
            result,
            Err(FetchError::RetriesExhausted { attempts: 1, .. })
        ));
        assert_eq!(calls, 1);
    }
}
