//! Failure taxonomy for conjunction analysis

use thiserror::Error;

/// Ways an analysis request can fail.
///
/// A response that arrives but cannot be understood is not an error; it is
/// returned as `AnalysisOutcome::Degraded`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Transport failure, timeout or server-side error; the caller may retry
    #[error("Conjunction service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The service asked us to slow down; never retried automatically
    #[error("Conjunction service rate limit exceeded: {0}")]
    RateLimited(String),

    /// Quota or payment required; fatal until an operator intervenes
    #[error("Conjunction service quota exhausted: {0}")]
    QuotaExceeded(String),
}

impl AnalysisError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Whether a later retry by the caller can succeed without operator action
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_) | Self::RateLimited(_))
    }

    /// Map a non-success HTTP status to the taxonomy
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            429 => Self::RateLimited(message),
            402 => Self::QuotaExceeded(message),
            _ => Self::ServiceUnavailable(format!("HTTP {}: {}", status, message)),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::ServiceUnavailable(format!("request timed out: {}", err))
        } else {
            Self::ServiceUnavailable(err.to_string())
        }
    }
}
