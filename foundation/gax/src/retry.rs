use std::future::Future;
use std::iter::Take;
use std::time::Duration;

use crate::cancel::{with_cancel, CancellationToken};
use crate::error::Error;

#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    current: u64,
    base: u64,
    factor: u64,
    max_delay: Option<Duration>,
}

impl ExponentialBackoff {
    pub fn from_millis(base: u64) -> ExponentialBackoff {
        ExponentialBackoff {
            current: base,
            base,
            factor: 1u64,
            max_delay: None,
        }
    }

    pub fn factor(mut self, factor: u64) -> ExponentialBackoff {
        self.factor = factor;
        self
    }

    pub fn max_delay(mut self, duration: Option<Duration>) -> ExponentialBackoff {
        self.max_delay = duration;
        self
    }
}

impl Iterator for ExponentialBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        // set delay duration by applying factor
        let duration = if let Some(duration) = self.current.checked_mul(self.factor) {
            Duration::from_millis(duration)
        } else {
            Duration::from_millis(u64::MAX)
        };

        // check if we reached max delay
        if let Some(ref max_delay) = self.max_delay {
            if duration > *max_delay {
                return Some(*max_delay);
            }
        }

        if let Some(next) = self.current.checked_mul(self.base) {
            self.current = next;
        } else {
            self.current = u64::MAX;
        }

        Some(duration)
    }
}

/// Decides whether a failed call may be attempted again.
pub trait Retriable {
    fn is_retriable(&self, setting: &RetrySetting) -> bool;
}

impl Retriable for Error {
    fn is_retriable(&self, setting: &RetrySetting) -> bool {
        match self {
            Error::Response(e) => {
                setting.codes.contains(&e.code) || e.reasons().any(|r| setting.reasons.iter().any(|v| v == r))
            }
            Error::HttpClient(e) => match e.status() {
                Some(status) => setting.codes.contains(&status.as_u16()),
                None => e.is_timeout() || e.is_connect(),
            },
            _ => false,
        }
    }
}

/// Retry policy supplied by the caller.
///
/// Delays are `from_millis^n * factor` milliseconds, capped by `max_delay`, for at most `take` retries.
#[derive(Clone, Debug)]
pub struct RetrySetting {
    pub from_millis: u64,
    pub max_delay: Option<Duration>,
    pub factor: u64,
    pub take: usize,
    /// HTTP status codes to retry.
    pub codes: Vec<u16>,
    /// `errors[].reason` values to retry regardless of the status code.
    pub reasons: Vec<String>,
}

impl RetrySetting {
    pub fn strategy(&self) -> Take<ExponentialBackoff> {
        ExponentialBackoff::from_millis(self.from_millis)
            .factor(self.factor)
            .max_delay(self.max_delay)
            .take(self.take)
    }

    /// Never retry.
    pub fn none() -> Self {
        Self {
            take: 0,
            ..Default::default()
        }
    }

    /// BigQuery back-off requirements: 1s, 2s, 4s ... capped at 32s, five retries,
    /// only for `rateLimitExceeded` and `backendError`.
    pub fn bigquery() -> Self {
        Self {
            from_millis: 2,
            max_delay: Some(Duration::from_secs(32)),
            factor: 500,
            take: 5,
            codes: vec![],
            reasons: vec!["rateLimitExceeded".to_string(), "backendError".to_string()],
        }
    }
}

impl Default for RetrySetting {
    fn default() -> Self {
        Self {
            from_millis: 2,
            max_delay: Some(Duration::from_secs(32)),
            factor: 500,
            take: 5,
            codes: vec![408, 429, 500, 502, 503, 504],
            reasons: vec![],
        }
    }
}

/// Repeats `f` while it fails with a retriable error and the retry budget lasts.
pub async fn invoke<T, A>(
    cancel: Option<&CancellationToken>,
    retry: Option<&RetrySetting>,
    mut f: impl FnMut() -> A,
) -> Result<T, Error>
where
    A: Future<Output = Result<T, Error>>,
{
    let fn_loop = async {
        let default_setting;
        let retry = match retry {
            Some(retry) => retry,
            None => {
                default_setting = RetrySetting::default();
                &default_setting
            }
        };
        let mut strategy = retry.strategy();
        loop {
            let err = match f().await {
                Ok(v) => return Ok(v),
                Err(e) => e,
            };
            if !err.is_retriable(retry) {
                return Err(err);
            }
            match strategy.next() {
                None => return Err(err),
                Some(duration) => {
                    tracing::debug!("retrying after {:?}: {}", duration, err);
                    tokio::time::sleep(duration).await
                }
            };
        }
    };
    with_cancel(cancel, fn_loop).await
}
