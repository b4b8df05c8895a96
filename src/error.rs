//! Error types for the data layer

use thiserror::Error;

/// Failure of a single records fetch.
///
/// The view treats every variant the same way (stop loading, keep the
/// previous records); the distinction only matters for logging.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP error with status {status}: {body}")]
    Http { status: u16, body: String },

    /// The body was not the expected JSON shape
    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A filter value the data source could not interpret
    #[error("Invalid value {value:?} for query parameter {param}")]
    InvalidParameter { param: &'static str, value: String },
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http { status, body }
    }

    /// Short category name for the activity log
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network",
            ApiError::Http { .. } => "http",
            ApiError::Parse(_) => "parse",
            ApiError::Io(_) => "io",
            ApiError::InvalidParameter { .. } => "parameter",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid base URL {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid timeout {0:?}, expected whole seconds")]
    InvalidTimeout(String),
}
