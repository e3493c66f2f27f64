use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Rate limited by {0}")]
    RateLimited(String),

    // Parsing errors
    #[error("Parse error: {0}")]
    Parse(String),

    // Delivery errors from the telegram library
    #[error("Telegram error: {0}")]
    Telegram(#[from] telegram::TelegramError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrendError {
    /// Whether a retry against the upstream could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            TrendError::RateLimited(_) => true,
            TrendError::Http(e) => e.is_timeout() || e.is_connect(),
            TrendError::Telegram(telegram::TelegramError::RateLimited) => true,
            _ => false,
        }
    }
}

pub type TrendResult<T> = Result<T, TrendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_retryable() {
        assert!(TrendError::RateLimited("twitter".to_string()).is_retryable());
    }

    #[test]
    fn test_api_and_parse_are_not_retryable() {
        assert!(!TrendError::Api("HTTP 403".to_string()).is_retryable());
        assert!(!TrendError::Parse("bad json".to_string()).is_retryable());
    }
}
