//! Error types for the lemon.markets client library.

use thiserror::Error;

/// The main error type for all lemon.markets client operations.
#[derive(Error, Debug)]
pub enum LemonError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The API answered with a non-success status
    #[error("lemon.markets API error: {0}")]
    Api(ApiError),

    /// A space payload carried a type outside of `strategy`/`app`
    #[error("Unexpected space type: {value}")]
    InvalidSpaceType {
        /// JSON rendering of the offending value
        value: String,
    },

    /// A required field was absent or null
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A numeric field could not be coerced to a float
    #[error("Field {field} is not numeric: {value}")]
    InvalidNumber {
        /// Name of the field
        field: String,
        /// JSON rendering of the offending value
        value: String,
    },

    /// The account state payload could not be interpreted
    #[error("Failed to retrieve account state: {0}")]
    AccountState(#[source] Box<LemonError>),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Error reported by the lemon.markets API through a non-success HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Message extracted from the response body
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl ApiError {
    /// Create a new API error from status and message.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Build an API error from a raw response body.
    ///
    /// The API reports errors as `{"detail": "..."}`; `message` and `error` keys are
    /// accepted as well. Anything else is kept verbatim.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["detail", "message", "error"]
                    .iter()
                    .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_owned))
            })
            .unwrap_or_else(|| body.to_string());
        Self::new(status, message)
    }

    /// Check if the access token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    /// Check if the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}
