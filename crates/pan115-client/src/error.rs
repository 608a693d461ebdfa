//! Client error types.

use thiserror::Error;

use crate::scalar::DecodeError;

/// Boxed error produced below the classifier (network, body decoding).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A classified remote-call failure.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP status {status}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
    },

    /// HTTP 200, but the body reports a logical failure.
    #[error("API error ({code}): {message}")]
    ApiState {
        /// Provider error code.
        code: i64,
        /// Provider error message.
        message: String,
    },
}

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Transport,
    HttpStatus,
    ApiState,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Transport(_) => ApiErrorKind::Transport,
            ApiError::HttpStatus { .. } => ApiErrorKind::HttpStatus,
            ApiError::ApiState { .. } => ApiErrorKind::ApiState,
        }
    }
}

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A wire field could not be mapped into the domain model.
    #[error("mapping failed: {0}")]
    Decode(#[from] DecodeError),

    /// The caller left out a required input.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending input.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No tool is registered under this name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// A local download target could not be written.
    #[error("cannot write '{path}': {source}")]
    LocalFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }

    /// The API failure kind, if this is a classified remote failure.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Error::Api(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// The provider error code for body-encoded failures.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Error::Api(ApiError::ApiState { code, .. }) => Some(*code),
            _ => None,
        }
    }

    /// Check if this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        self.api_kind() == Some(ApiErrorKind::Transport)
    }

    /// Check if this is an authentication failure reported over HTTP.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::Api(ApiError::HttpStatus {
                status: 401 | 403
            })
        )
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api(ApiError::HttpStatus { status }) if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
