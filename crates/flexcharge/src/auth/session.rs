//! Session state owned by the authenticator.

use chrono::{DateTime, Utc};

use super::tokens::{AccessToken, RefreshToken};

/// Token state for one authenticated connection to the billing API.
///
/// A `Session` is owned exclusively by a
/// [`TokenAuthenticator`](crate::TokenAuthenticator) and mutated only by a
/// successful credential exchange. It is never persisted; after a process
/// restart callers must authenticate again.
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// Current access token, if a token exchange has succeeded.
    pub access_token: Option<AccessToken>,
    /// Refresh token handed out with the access token. Stored but unused;
    /// this client renews sessions by re-running the credential exchange.
    pub refresh_token: Option<RefreshToken>,
    /// Advertised token lifetime in seconds, if the API reported one.
    pub expires_in: Option<u64>,
    /// When the current token was issued, if `expires_in` was reported.
    pub started_at: Option<DateTime<Utc>>,
}

impl Session {
    /// True iff the session holds an access token.
    ///
    /// Note that expiry is not checked; `expires_in`/`started_at` are
    /// recorded for inspection only.
    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }
}

/// The most recent request outcome, kept for caller inspection.
///
/// Overwritten by every failed call and cleared by every successful one;
/// there is no history.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    /// HTTP status code of the failed response.
    pub status_code: u16,
    /// Top-level `message` field from the response body, if present.
    pub message: Option<String>,
    /// Raw `errors` field from the response body, if present.
    pub errors: Option<serde_json::Value>,
}

impl From<&crate::error::ApiError> for Outcome {
    fn from(err: &crate::error::ApiError) -> Self {
        Self {
            status_code: err.status,
            message: err.message.clone(),
            errors: err.errors.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_has_no_token() {
        let session = Session::default();
        assert!(!session.has_access_token());
        assert!(session.started_at.is_none());
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let session = Session {
            access_token: Some(AccessToken::new("tok-value")),
            refresh_token: Some(RefreshToken::new("refresh-value")),
            expires_in: Some(3600),
            started_at: Some(Utc::now()),
        };
        let debug = format!("{:?}", session);
        assert!(!debug.contains("tok-value"));
        assert!(!debug.contains("refresh-value"));
    }
}
