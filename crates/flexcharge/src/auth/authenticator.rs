//! Token acquisition and the authenticated request executor.

use std::sync::Arc;

use chrono::Utc;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

use crate::error::{ApiError, AuthError, Error};
use crate::http::{
    ApiClient, ErrorBody, RESOURCE_ID_HEADER, RequestConfig, TOKEN_PATH, TokenResponse,
};
use crate::types::ApiUrl;

use super::credentials::Credentials;
use super::session::{Outcome, Session};
use super::tokens::{AccessToken, RefreshToken};

/// Owns the credential exchange and the current [`Session`].
///
/// One authenticator instance serves one logical session. All authenticated
/// calls go through it: it attaches the current access token, classifies
/// responses against the expected status, and keeps the last failed outcome
/// for inspection. No other component touches the token state.
///
/// # Thread Safety
///
/// Authenticators are cheap to clone (they share state via an internal
/// `Arc`) and safe to share across tasks; session and outcome updates are
/// guarded by an async lock.
///
/// # Example
///
/// ```no_run
/// use flexcharge::{ApiUrl, Credentials, TokenAuthenticator};
///
/// # async fn example() -> Result<(), flexcharge::Error> {
/// let base = ApiUrl::billercentral();
/// let creds = Credentials::new("acme", "alice", "pw", "client-1", "s3cret");
/// let auth = TokenAuthenticator::new(base, creds);
///
/// if auth.authenticate().await? {
///     println!("token acquired");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TokenAuthenticator {
    inner: Arc<AuthInner>,
}

struct AuthInner {
    credentials: Credentials,
    client: ApiClient,
    state: RwLock<AuthState>,
}

#[derive(Default)]
struct AuthState {
    session: Session,
    last_outcome: Option<Outcome>,
}

/// Result of a successful form submission (POST/PUT/DELETE).
pub(crate) struct SubmitReceipt {
    /// The id assigned by the server, from the `resource_id` header.
    pub resource_id: Option<String>,
}

impl TokenAuthenticator {
    /// Create an authenticator with the default request options.
    pub fn new(base: ApiUrl, credentials: Credentials) -> Self {
        Self::with_config(base, credentials, &RequestConfig::default())
    }

    /// Create an authenticator with explicit request options.
    pub fn with_config(base: ApiUrl, credentials: Credentials, config: &RequestConfig) -> Self {
        let client = ApiClient::new(base, config);

        Self {
            inner: Arc::new(AuthInner {
                credentials,
                client,
                state: RwLock::new(AuthState::default()),
            }),
        }
    }

    /// Returns the API base URL this authenticator talks to.
    pub fn base(&self) -> &ApiUrl {
        self.inner.client.base()
    }

    /// Run the `grant_type=password` token exchange.
    ///
    /// On HTTP 200 the session is updated from the response body and the
    /// last-outcome record is cleared; returns `Ok(true)`. Any other status
    /// records the outcome and returns `Ok(false)`. Exactly one network
    /// call is made either way.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport failures; a rejected exchange is
    /// a normal `Ok(false)` return.
    #[instrument(skip(self), fields(company = %self.inner.credentials.company(), username = %self.inner.credentials.username()))]
    pub async fn authenticate(&self) -> Result<bool, Error> {
        info!("authenticating against billing API");

        let creds = &self.inner.credentials;
        let form = vec![
            ("grant_type".to_string(), "password".to_string()),
            ("company".to_string(), creds.company().to_string()),
            ("username".to_string(), creds.username().to_string()),
            ("password".to_string(), creds.password().to_string()),
            ("client_id".to_string(), creds.client_id().to_string()),
            ("client_secret".to_string(), creds.client_secret().to_string()),
        ];

        let response = self
            .inner
            .client
            .send_form(Method::POST, TOKEN_PATH, &form)
            .await?;

        if response.status() == StatusCode::OK {
            let body: TokenResponse = response.json().await?;

            let mut state = self.inner.state.write().await;
            if let Some(token) = body.access_token {
                state.session.access_token = Some(AccessToken::new(token));
            }
            if let Some(token) = body.refresh_token {
                state.session.refresh_token = Some(RefreshToken::new(token));
            }
            if let Some(expires_in) = body.expires_in {
                state.session.expires_in = Some(expires_in);
                state.session.started_at = Some(Utc::now());
            }
            state.last_outcome = None;

            debug!(expires_in = ?state.session.expires_in, "token exchange succeeded");
            Ok(true)
        } else {
            let failure = self.record_failure(response).await;
            error!(status = failure.status, "token exchange failed");
            Ok(false)
        }
    }

    /// True iff the session currently holds an access token.
    ///
    /// Expiry is not checked; a stale token is only discovered when the
    /// API rejects it, at which point callers re-run [`authenticate`].
    ///
    /// [`authenticate`]: Self::authenticate
    pub async fn has_valid_token(&self) -> bool {
        self.inner.state.read().await.session.has_access_token()
    }

    /// Make sure the session holds an access token, authenticating with
    /// the stored credentials if it does not.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] when the exchange is refused, so a
    /// failed authentication short-circuits the calling operation.
    pub(crate) async fn ensure_token(&self) -> Result<(), Error> {
        if self.has_valid_token().await {
            return Ok(());
        }

        if self.authenticate().await? {
            Ok(())
        } else {
            let status = self
                .last_outcome()
                .await
                .map(|o| o.status_code)
                .unwrap_or_default();
            Err(AuthError::Rejected { status }.into())
        }
    }

    /// Token refresh is not implemented by this client.
    ///
    /// The API hands out a refresh token, and the session stores it, but
    /// the only supported way to renew a session is to re-run
    /// [`authenticate`](Self::authenticate). Always returns an error.
    pub async fn refresh(&self) -> Result<(), Error> {
        Err(AuthError::RefreshUnsupported.into())
    }

    /// Returns a snapshot of the current session state.
    pub async fn session(&self) -> Session {
        self.inner.state.read().await.session.clone()
    }

    /// Returns the most recent failed outcome, if the last call failed.
    pub async fn last_outcome(&self) -> Option<Outcome> {
        self.inner.state.read().await.last_outcome.clone()
    }

    /// Export the current access token.
    pub async fn access_token(&self) -> Option<String> {
        self.inner
            .state
            .read()
            .await
            .session
            .access_token
            .as_ref()
            .map(|t| t.as_str().to_string())
    }

    async fn required_token(&self) -> Result<String, Error> {
        self.access_token()
            .await
            .ok_or_else(|| AuthError::MissingToken.into())
    }

    // ========================================================================
    // Request executor
    // ========================================================================

    /// Issue an authenticated GET and decode the body on HTTP 200.
    ///
    /// The access token travels as a query parameter. Any other status
    /// records the outcome and surfaces as [`Error::Api`].
    pub(crate) async fn execute_get<R>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let token = self.required_token().await?;

        let mut query: Vec<(String, String)> = params.to_vec();
        query.push(("access_token".to_string(), token));

        let response = self.inner.client.get(path, &query).await?;

        if response.status() == StatusCode::OK {
            self.clear_outcome().await;
            Ok(response.json().await?)
        } else {
            Err(self.record_failure(response).await.into())
        }
    }

    /// Issue an authenticated form submission and classify against the
    /// expected success status.
    ///
    /// The access token travels as a form field. On success the outcome
    /// record is cleared and the `resource_id` response header, if any, is
    /// returned.
    pub(crate) async fn execute_form(
        &self,
        method: Method,
        path: &str,
        mut form: Vec<(String, String)>,
        expect: StatusCode,
    ) -> Result<SubmitReceipt, Error> {
        let token = self.required_token().await?;
        form.push(("access_token".to_string(), token));

        let response = self.inner.client.send_form(method, path, &form).await?;

        if response.status() == expect {
            let resource_id = response
                .headers()
                .get(RESOURCE_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string());

            self.clear_outcome().await;
            Ok(SubmitReceipt { resource_id })
        } else {
            Err(self.record_failure(response).await.into())
        }
    }

    /// Capture a failed response into the last-outcome record.
    ///
    /// The body is parsed tolerantly: a missing or non-JSON body still
    /// yields an outcome with the status code.
    async fn record_failure(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body: ErrorBody = response.json().await.unwrap_or_default();

        let failure = ApiError::new(status, body.message, body.errors);

        let mut state = self.inner.state.write().await;
        state.last_outcome = Some(Outcome::from(&failure));

        failure
    }

    async fn clear_outcome(&self) {
        self.inner.state.write().await.last_outcome = None;
    }
}

// Custom Debug impl that hides credential and token state
impl std::fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("base", &self.inner.client.base().as_str())
            .field("session", &"[REDACTED]")
            .finish()
    }
}
