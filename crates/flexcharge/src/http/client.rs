//! Low-level HTTP client for the billing API.

use reqwest::{Method, redirect};
use tracing::trace;

use crate::error::Error;
use crate::types::ApiUrl;

use super::config::RequestConfig;

/// Thin wrapper over a reqwest client bound to one API base URL.
///
/// The transport options are captured from a [`RequestConfig`] when the
/// client is built and apply to every request it sends. Status
/// classification is left to the caller; this layer only moves bytes.
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    http: reqwest::Client,
    base: ApiUrl,
    delay: Option<std::time::Duration>,
    http_errors: bool,
}

impl ApiClient {
    /// Build a client for the given base URL with the given options.
    pub(crate) fn new(base: ApiUrl, config: &RequestConfig) -> Self {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("flexcharge/", env!("CARGO_PKG_VERSION")))
            .default_headers(config.headers.clone())
            .cookie_store(config.cookies);

        if !config.allow_redirects {
            builder = builder.redirect(redirect::Policy::none());
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if !config.decode_content {
            builder = builder.no_gzip();
        }

        let http = builder.build().expect("failed to build HTTP client");

        Self {
            http,
            base,
            delay: config.delay,
            http_errors: config.http_errors,
        }
    }

    /// Returns the base URL this client is configured for.
    pub(crate) fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Issue a GET request with the given query parameters.
    pub(crate) async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<reqwest::Response, Error> {
        let url = self.base.endpoint(path);
        trace!(%url, "GET");

        self.pause().await;
        let response = self.http.get(&url).query(query).send().await?;

        self.classify(response)
    }

    /// Issue a request carrying a form-encoded body.
    pub(crate) async fn send_form(
        &self,
        method: Method,
        path: &str,
        form: &[(String, String)],
    ) -> Result<reqwest::Response, Error> {
        let url = self.base.endpoint(path);
        trace!(%method, %url, "form request");

        self.pause().await;
        let response = self.http.request(method, &url).form(form).send().await?;

        self.classify(response)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn classify(&self, response: reqwest::Response) -> Result<reqwest::Response, Error> {
        if self.http_errors {
            Ok(response.error_for_status()?)
        } else {
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let base = ApiUrl::new("https://api.example.com").unwrap();
        let client = ApiClient::new(base.clone(), &RequestConfig::default());
        assert_eq!(client.base().as_str(), base.as_str());
    }
}
