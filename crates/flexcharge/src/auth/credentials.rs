//! Billing API credentials type.

use std::fmt;

/// Credentials for the billing API `grant_type=password` token exchange.
///
/// All five fields are required by the token endpoint. The set is opaque
/// and immutable for the lifetime of the authenticator it is given to.
///
/// # Security
///
/// The password and client secret are never exposed in Debug output to
/// prevent accidental logging.
///
/// # Example
///
/// ```
/// use flexcharge::Credentials;
///
/// let creds = Credentials::new("acme", "alice", "pw", "client-1", "s3cret");
/// assert_eq!(creds.username(), "alice");
/// ```
pub struct Credentials {
    company: String,
    username: String,
    password: String,
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Create a new credential set.
    pub fn new(
        company: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            username: username.into(),
            password: password.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Returns the company identifier.
    pub fn company(&self) -> &str {
        &self.company
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing the token exchange request.
    /// Never log or display this value.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Returns the OAuth client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth client secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing the token exchange request.
    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

// Intentionally hide secrets in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("company", &self.company)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

// Clone is intentionally implemented to allow credentials to be reused,
// but the type is not Copy to make credential passing explicit.
impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            company: self.company.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hide_secrets_in_debug() {
        let creds = Credentials::new("acme", "alice", "secret123", "cid", "csecret456");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("acme"));
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret123"));
        assert!(!debug.contains("csecret456"));
        assert!(debug.contains("[REDACTED]"));
    }
}
