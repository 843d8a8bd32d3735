use thiserror::Error;

/// Errors produced by the analysis core.
///
/// The core never raises for division-by-zero conditions: ratios use the
/// `max(x, 0.001)` denominator floor and the remaining statistics fall back
/// to explicit `0` defaults. The two variants below are the only ways an
/// analysis call can fail.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Malformed input: unparseable wire fields, or an empty trade list
    /// where at least one trade is required. No partial result is produced.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Structurally valid input that lacks the data a metric needs, e.g. an
    /// empty book side where a best price is required. Depth and imbalance
    /// degrade to `0` instead of reaching this.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors from the market-data fetch layer.
///
/// These never cross into the analysis core; the CLI surfaces them directly.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FetchError::ConnectionError(_) | FetchError::RateLimitError(_)
        )
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::ConnectionError("Request timeout".to_string())
        } else if err.is_connect() {
            FetchError::ConnectionError("Failed to connect to exchange API".to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => FetchError::RateLimitError(
                    "Too many requests. Retry after 60 seconds.".to_string(),
                ),
                418 => FetchError::ConnectionError("IP address banned by exchange".to_string()),
                403 => FetchError::ConnectionError(
                    "WAF limit violated. Reduce request frequency.".to_string(),
                ),
                500..=599 => FetchError::ConnectionError(format!(
                    "Exchange server error (HTTP {})",
                    status.as_u16()
                )),
                _ => FetchError::InvalidRequest(format!("HTTP error: {}", status)),
            }
        } else {
            FetchError::ConnectionError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::ParseError(format!("JSON parsing failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_retryable() {
        assert!(FetchError::RateLimitError("429".to_string()).is_retryable());
        assert!(FetchError::ConnectionError("down".to_string()).is_retryable());
        assert!(!FetchError::ParseError("bad json".to_string()).is_retryable());
        assert!(!FetchError::InvalidRequest("400".to_string()).is_retryable());
    }

    #[test]
    fn test_analysis_error_display() {
        let err = AnalysisError::InsufficientData("order book has no asks".to_string());
        assert_eq!(err.to_string(), "Insufficient data: order book has no asks");
    }
}
