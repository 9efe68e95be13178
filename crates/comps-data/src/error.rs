//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Yahoo Finance API error
    #[error("Yahoo Finance API error: {0}")]
    YahooApi(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Missing data
    #[error("Missing data for {symbol}: {reason}")]
    MissingData {
        /// Symbol that was queried
        symbol: String,
        /// Reason for missing data
        reason: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// HTTP error
    #[error("HTTP {status} from {url}")]
    Http {
        /// Response status code
        status: u16,
        /// Requested URL without the crumb
        url: String,
    },

    /// Session cookie or crumb could not be obtained
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl DataError {
    /// Shorthand for a [`DataError::MissingData`].
    pub fn missing(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MissingData {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Whether the provider rejected the session and a fresh crumb may help.
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_display() {
        let err = DataError::missing("ZZZZ", "no data found");
        assert_eq!(err.to_string(), "Missing data for ZZZZ: no data found");
    }

    #[test]
    fn test_is_unauthorized() {
        let unauthorized = DataError::Http {
            status: 401,
            url: "https://example.test".to_string(),
        };
        let not_found = DataError::Http {
            status: 404,
            url: "https://example.test".to_string(),
        };
        assert!(unauthorized.is_unauthorized());
        assert!(!not_found.is_unauthorized());
        assert!(!DataError::Auth("x".to_string()).is_unauthorized());
    }
}
