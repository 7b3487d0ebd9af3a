//! Error types for the WeCom client.
//!
//! Transport and configuration failures are errors. Provider-level failures
//! (`errcode != 0`) on send calls are not: the response is handed back to the
//! caller, who may opt in to an error via [`crate::types::ApiResponse::into_result`].

use thiserror::Error;

/// Result type for WeCom operations
pub type WecomResult<T> = Result<T, WecomError>;

/// Root error type for the WeCom client
#[derive(Error, Debug, Clone)]
pub enum WecomError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    /// Request building error
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Response parsing error
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// Provider reported a non-zero errcode
    #[error("API error: {errcode} - {errmsg}")]
    Api {
        /// WeCom error code
        errcode: i64,
        /// WeCom error message
        errmsg: String,
    },
}

impl WecomError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "WECOM_CONFIG",
            Self::Authentication(_) => "WECOM_AUTH",
            Self::Request(_) => "WECOM_REQUEST",
            Self::Network(_) => "WECOM_NETWORK",
            Self::Response(_) => "WECOM_RESPONSE",
            Self::Api { .. } => "WECOM_API",
        }
    }

    /// Provider errcode, if this error carries one
    pub fn errcode(&self) -> Option<i64> {
        match self {
            Self::Api { errcode, .. } => Some(*errcode),
            Self::Authentication(AuthenticationError::TokenRequestFailed { errcode, .. }) => {
                Some(*errcode)
            }
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    /// A required field was not supplied
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },
}

/// Authentication errors
#[derive(Error, Debug, Clone)]
pub enum AuthenticationError {
    /// Token endpoint rejected the credentials
    #[error("Access token request failed: {errcode} - {errmsg}")]
    TokenRequestFailed {
        /// WeCom error code
        errcode: i64,
        /// WeCom error message
        errmsg: String,
    },

    /// Token endpoint answered without a token
    #[error("Token response did not contain an access_token")]
    MissingAccessToken,
}

/// Request building errors
#[derive(Error, Debug, Clone)]
pub enum RequestError {
    /// Payload could not be serialized
    #[error("Invalid payload: {message}")]
    InvalidPayload {
        /// Error message
        message: String,
    },
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::InvalidPayload {
            message: err.to_string(),
        }
    }
}

/// Network errors
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    /// Connection failed
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_connect() {
            NetworkError::ConnectionFailed {
                message: err.to_string(),
            }
        } else {
            NetworkError::Http(err.to_string())
        }
    }
}

/// Response parsing errors
#[derive(Error, Debug, Clone)]
pub enum ResponseError {
    /// JSON deserialization error
    #[error("Deserialization error: {message}")]
    DeserializationError {
        /// Error message
        message: String,
    },

    /// Unexpected response format
    #[error("Unexpected response: {message}")]
    UnexpectedResponse {
        /// Error message
        message: String,
    },
}

impl From<serde_json::Error> for ResponseError {
    fn from(err: serde_json::Error) -> Self {
        ResponseError::DeserializationError {
            message: err.to_string(),
        }
    }
}
