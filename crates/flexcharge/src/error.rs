//! Error types for the flexcharge library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for flexcharge operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected credentials, missing token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// API errors (unexpected HTTP status on a resource call).
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors (invalid base URL, unusable customer).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error (malformed response, body read failure).
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token exchange was rejected by the billing API.
    #[error("authentication failed (HTTP {status})")]
    Rejected { status: u16 },

    /// An authenticated call was attempted without an access token.
    #[error("no access token in session")]
    MissingToken,

    /// Token refresh is not implemented by this client; re-run
    /// [`authenticate`](crate::TokenAuthenticator::authenticate) instead.
    #[error("token refresh is not supported")]
    RefreshUnsupported,
}

/// An unexpected HTTP status from a resource call, with whatever the
/// error body carried.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Top-level `message` field from the error body, if present.
    pub message: Option<String>,
    /// Raw `errors` field from the error body, if present.
    pub errors: Option<serde_json::Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: Option<String>, errors: Option<serde_json::Value>) -> Self {
        Self {
            status,
            message,
            errors,
        }
    }

    /// Check if this is an authentication/authorization rejection.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// The customer has no stored contract id where one is required.
    #[error("customer '{username}' has no contract id")]
    MissingContractId { username: String },
}
