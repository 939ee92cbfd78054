//! Immutable per-client request configuration.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

/// Transport options applied to every request issued by one client.
///
/// A `RequestConfig` is constructed once (via [`RequestConfig::default`] or
/// the [builder](RequestConfig::builder)) and captured by the HTTP client at
/// construction time; there is no shared mutable option state between calls.
///
/// The defaults match what the billing API expects from this client:
/// redirects are not followed, unexpected HTTP statuses surface as normal
/// return values rather than errors, and responses are requested as JSON.
#[derive(Clone, Debug)]
pub struct RequestConfig {
    /// Follow HTTP redirects. Off by default.
    pub allow_redirects: bool,
    /// Use a cookie store across requests. Off by default.
    pub cookies: bool,
    /// Total per-request timeout. None means no limit.
    pub timeout: Option<Duration>,
    /// Connect-phase timeout. None means no limit.
    pub connect_timeout: Option<Duration>,
    /// Automatically decode compressed response bodies. On by default.
    pub decode_content: bool,
    /// Fixed delay applied before each request is sent.
    pub delay: Option<Duration>,
    /// Treat any non-success HTTP status as a transport error.
    /// Off by default so status classification stays with the caller.
    pub http_errors: bool,
    /// Default headers attached to every request.
    pub headers: HeaderMap,
}

impl Default for RequestConfig {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            allow_redirects: false,
            cookies: false,
            timeout: None,
            connect_timeout: None,
            decode_content: true,
            delay: None,
            http_errors: false,
            headers,
        }
    }
}

impl RequestConfig {
    /// Start building a config from the defaults.
    pub fn builder() -> RequestConfigBuilder {
        RequestConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RequestConfig`].
#[derive(Clone, Debug)]
pub struct RequestConfigBuilder {
    config: RequestConfig,
}

impl RequestConfigBuilder {
    /// Follow HTTP redirects.
    pub fn allow_redirects(mut self, allow: bool) -> Self {
        self.config.allow_redirects = allow;
        self
    }

    /// Use a cookie store across requests.
    pub fn cookies(mut self, cookies: bool) -> Self {
        self.config.cookies = cookies;
        self
    }

    /// Set the total per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the connect-phase timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Automatically decode compressed response bodies.
    pub fn decode_content(mut self, decode: bool) -> Self {
        self.config.decode_content = decode;
        self
    }

    /// Apply a fixed delay before each request is sent.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = Some(delay);
        self
    }

    /// Treat any non-success HTTP status as a transport error.
    pub fn http_errors(mut self, http_errors: bool) -> Self {
        self.config.http_errors = http_errors;
        self
    }

    /// Add a default header attached to every request.
    ///
    /// # Panics
    ///
    /// Panics if the header name or value is malformed; both are expected
    /// to be compile-time constants.
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.config.headers.insert(
            name,
            HeaderValue::from_str(value).expect("invalid header value"),
        );
        self
    }

    /// Finish building.
    pub fn build(self) -> RequestConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_expected_request_options() {
        let config = RequestConfig::default();
        assert!(!config.allow_redirects);
        assert!(!config.http_errors);
        assert!(config.decode_content);
        assert_eq!(
            config.headers.get(ACCEPT).unwrap().to_str().unwrap(),
            "application/json"
        );
    }

    #[test]
    fn builder_overrides_single_fields() {
        let config = RequestConfig::builder()
            .allow_redirects(true)
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(2))
            .build();
        assert!(config.allow_redirects);
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(2)));
        // Untouched fields keep their defaults
        assert!(!config.cookies);
        assert!(config.headers.contains_key(ACCEPT));
    }
}
