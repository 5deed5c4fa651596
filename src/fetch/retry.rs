//! Failure classification and backoff policy
//!
//! Every fetch failure is classified as transient (worth retrying) or
//! permanent (fail immediately). The retry loop in the engine consults this
//! classification and the exponential backoff schedule between attempts.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Base delay doubled on each retry attempt
const BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Terminal classification of a failed fetch attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("request timeout")]
    Timeout,

    #[error("connection failed")]
    Connect,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("malformed URL: {0}")]
    Malformed(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("abandoned by batch timeout")]
    Abandoned,
}

impl FailureKind {
    /// Whether the retry loop should attempt this URL again
    ///
    /// Timeouts, connection resets, 429 and 5xx responses are transient.
    /// Other 4xx responses and malformed URLs are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            FailureKind::Timeout | FailureKind::Connect => true,
            FailureKind::Status(status) => *status == 429 || (500..=599).contains(status),
            FailureKind::Malformed(_) | FailureKind::Abandoned => false,
            FailureKind::Body(_) => true,
        }
    }
}

/// Classifies an HTTP response status
///
/// Returns `None` for success statuses, `Some(FailureKind)` otherwise.
pub fn classify_status(status: StatusCode) -> Option<FailureKind> {
    if status.is_success() {
        None
    } else {
        Some(FailureKind::Status(status.as_u16()))
    }
}

/// Classifies a reqwest transport error
pub fn classify_error(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_connect() {
        FailureKind::Connect
    } else if error.is_builder() || error.is_request() {
        FailureKind::Malformed(error.to_string())
    } else {
        FailureKind::Body(error.to_string())
    }
}

/// Computes the backoff delay before retry attempt `attempt`
///
/// delay = base * 2^attempt, capped at `cap`. Attempt numbering starts at 0
/// for the first retry.
pub fn backoff_delay(attempt: u32, cap: Duration) -> Duration {
    let multiplier = 2u64.saturating_pow(attempt.min(31));
    let delay = BACKOFF_BASE.saturating_mul(multiplier as u32);
    delay.min(cap)
}
