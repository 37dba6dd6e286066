use std::error::Error as StdError;
use thiserror::Error;

/// Result type alias for alert client operations
pub type Result<T> = std::result::Result<T, AlertClientError>;

/// Errors that can occur when raising or listing alerts
#[derive(Debug, Error)]
pub enum AlertClientError {
    /// A required alert field was empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Priority was not one of low, medium or high
    #[error("Invalid priority '{0}': must be one of low, medium, high")]
    InvalidPriority(String),

    /// Base URL could not be parsed or cannot carry a path
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Configuration value could not be interpreted
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to build HTTP client
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest_middleware::Error),

    /// Response body was not the expected JSON
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// The API returned a non-success status
    #[error("Alert API error: HTTP {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body returned by the server
        message: String,
    },
}

impl AlertClientError {
    /// Check if the error was raised by input validation, before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::InvalidPriority(_))
    }

    /// Check if the error is retryable
    ///
    /// Returns `true` for:
    /// - Network/connection errors
    /// - Timeout errors
    /// - Server errors (5xx status codes)
    ///
    /// The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(reqwest_middleware::Error::Reqwest(err)) => {
                err.is_connect() || err.is_timeout()
            }
            Self::Request(source) => StdError::source(source)
                .and_then(|err| err.downcast_ref::<reqwest::Error>())
                .is_some_and(|err| err.is_connect() || err.is_timeout()),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_retryable_5xx() {
        for status in [500, 502, 503] {
            let error = AlertClientError::Api {
                status,
                message: "Server error".to_string(),
            };
            assert!(error.is_retryable(), "HTTP {status} should be retryable");
        }
    }

    #[test]
    fn test_api_error_not_retryable_4xx() {
        for status in [400, 404, 422] {
            let error = AlertClientError::Api {
                status,
                message: "Client error".to_string(),
            };
            assert!(!error.is_retryable(), "HTTP {status} should not be retryable");
        }
    }

    #[test]
    fn test_validation_errors() {
        assert!(AlertClientError::MissingField("title").is_validation());
        assert!(AlertClientError::InvalidPriority("urgent".to_string()).is_validation());
        assert!(!AlertClientError::MissingField("title").is_retryable());

        let error = AlertClientError::Api {
            status: 400,
            message: "Bad request".to_string(),
        };
        assert!(!error.is_validation());
    }

    #[test]
    fn test_error_display() {
        let error = AlertClientError::Api {
            status: 400,
            message: r#"{"error":"Title and description are required fields"}"#.to_string(),
        };
        assert_eq!(
            error.to_string(),
            r#"Alert API error: HTTP 400 - {"error":"Title and description are required fields"}"#
        );

        assert_eq!(
            AlertClientError::InvalidPriority("urgent".to_string()).to_string(),
            "Invalid priority 'urgent': must be one of low, medium, high"
        );
        assert_eq!(
            AlertClientError::MissingField("description").to_string(),
            "Missing required field: description"
        );
    }
}
