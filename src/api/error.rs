use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - invalid or expired credentials")]
    Unauthorized,

    #[error("All {attempts} attempts failed")]
    ExhaustedRetries { attempts: u32 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request body cannot be replayed for retry")]
    UnreplayableRequest,
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            _ => ApiError::Status {
                status,
                body: Self::truncate_body(body),
            },
        }
    }
}

/// Retry behavior for the retrying fetch: a fixed attempt bound with a
/// fixed inter-attempt delay. No backoff, no jitter.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

/// Default number of attempts before giving up.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay between attempts in milliseconds.
const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// A policy that sleeps for no time between attempts, for tests.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            delay: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_unauthorized() {
        let err = ApiError::from_status(reqwest::StatusCode::UNAUTHORIZED, "nope");
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn test_from_status_other() {
        let err = ApiError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncates_long_bodies() {
        let long = "x".repeat(2000);
        let err = ApiError::from_status(reqwest::StatusCode::BAD_GATEWAY, &long);
        match err {
            ApiError::Status { body, .. } => {
                assert!(body.len() < 600);
                assert!(body.contains("truncated"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_default_retry_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay, Duration::from_millis(1000));
    }
}
