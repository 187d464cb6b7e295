//! Error types for the Yodlee API client.
//!
//! Every public operation returns [`Result<T>`]. Failures below the
//! operation boundary (HTTP errors, odd status codes) are folded into
//! [`Error::Authentication`] for login calls and [`Error::Api`] for
//! business endpoints, so callers only ever match on the variants that
//! describe what went wrong from their point of view.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Yodlee operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Yodlee API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Cobrand or user username/password missing or empty
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Only some of the pre-seeded session fields were supplied
    #[error("Both session tokens and both expirations are required together")]
    PartialTokens,

    /// A required per-call field was missing
    #[error("Missing required argument: {field}")]
    InvalidArgument {
        /// Name of the first missing field
        field: &'static str,
    },

    /// Cobrand or user login failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A business endpoint reported an error or could not be reached
    #[error("API error: {message}")]
    Api {
        /// Human-readable error message
        message: String,
        /// Raw response body, when the service sent one
        body: Option<Value>,
    },

    /// User token expired and no credentials were supplied to refresh it
    #[error("User session expired; credentials required to log in again")]
    SessionExpired,

    /// Response body was not JSON or lacked an expected field
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success status with a body the service error shape can't describe
    #[error("Transport error: {0}")]
    Transport(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if this is an authentication-related error.
    ///
    /// # Example
    ///
    /// ```
    /// use yodlee_rs::Error;
    ///
    /// assert!(Error::SessionExpired.is_auth_error());
    /// assert!(!Error::PartialTokens.is_auth_error());
    /// ```
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::Authentication(_) | Error::SessionExpired | Error::InvalidCredentials(_)
        )
    }

    /// Returns `true` if the caller can fix this error by changing its input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidCredentials(_)
                | Error::PartialTokens
                | Error::InvalidArgument { .. }
                | Error::Config(_)
        )
    }

    /// Fold a failure from the login path into [`Error::Authentication`].
    ///
    /// Errors that already carry the caller-facing meaning pass through.
    pub(crate) fn into_authentication(self) -> Self {
        match self {
            Error::Api { message, .. } => Error::Authentication(message),
            Error::Http(e) => Error::Authentication(e.to_string()),
            Error::Transport(message) => Error::Authentication(message),
            other => other,
        }
    }

    /// Fold a transport failure from a business endpoint into [`Error::Api`].
    pub(crate) fn into_api(self) -> Self {
        match self {
            Error::Http(e) => Error::Api {
                message: e.to_string(),
                body: None,
            },
            Error::Transport(message) => Error::Api {
                message,
                body: None,
            },
            other => other,
        }
    }
}

/// Inspect a parsed response body for a service-reported error.
///
/// The service uses two shapes: a top-level `Error` array whose first
/// element carries `errorDetail`, and a bare top-level `message`. Either
/// one marks the whole response as failed.
pub(crate) fn service_error(body: &Value) -> Option<String> {
    let obj = body.as_object()?;

    if let Some(errors) = obj.get("Error") {
        let detail = errors
            .as_array()
            .and_then(|a| a.first())
            .and_then(|e| e.get("errorDetail"))
            .and_then(|d| d.as_str())
            .or_else(|| obj.get("message").and_then(|m| m.as_str()))
            .unwrap_or("Unknown API error");
        return Some(detail.to_string());
    }

    obj.get("message").map(|m| match m.as_str() {
        Some(s) => s.to_string(),
        None => m.to_string(),
    })
}
