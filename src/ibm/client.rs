//! Shared HTTP client for IBM Cloud platform services

use std::fmt::Display;
use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::config::http;
use crate::error::{PsError, Result};
use crate::ibm::Authenticator;

/// Settings used to construct a service client
///
/// `url` left as `None` selects the service's default endpoint.
#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    pub service_name: String,
    pub url: Option<String>,
    pub authenticator: Authenticator,
}

impl ServiceOptions {
    pub fn new(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_authenticator(mut self, authenticator: Authenticator) -> Self {
        self.authenticator = authenticator;
        self
    }
}

/// Ordered query parameters; `None` values are skipped
#[derive(Debug, Default)]
pub(crate) struct Query(Vec<(&'static str, String)>);

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &'static str, value: impl Display) -> &mut Self {
        self.0.push((name, value.to_string()));
        self
    }

    pub(crate) fn push_opt<T: Display>(&mut self, name: &'static str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.push(name, v);
        }
        self
    }
}

/// HTTP client bound to one service endpoint
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    service_name: String,
    base_url: String,
    authenticator: Authenticator,
    default_headers: HeaderMap,
}

impl ServiceClient {
    /// Create a client from options, falling back to `default_url`
    pub fn new(options: ServiceOptions, default_url: &str) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(http::POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(http::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(http::REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        let url = options.url.as_deref().unwrap_or(default_url);
        let base_url = validate_service_url(url)?;

        debug!(
            "Created {} client for {} (auth: {})",
            options.service_name,
            base_url,
            options.authenticator.auth_type()
        );

        Ok(Self {
            client,
            service_name: options.service_name,
            base_url,
            authenticator: options.authenticator,
            default_headers: HeaderMap::new(),
        })
    }

    /// Service name used for external configuration lookups
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Current service URL
    pub fn service_url(&self) -> &str {
        &self.base_url
    }

    /// Point the client at another endpoint
    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        self.base_url = validate_service_url(url)?;
        Ok(())
    }

    /// Headers added to every request
    pub fn set_default_headers(&mut self, headers: HeaderMap) {
        self.default_headers = headers;
    }

    /// Add a single default header
    pub fn add_default_header(&mut self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| PsError::invalid(format!("header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| PsError::invalid(format!("header value for '{}': {}", name, e)))?;
        self.default_headers.insert(name, value);
        Ok(())
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Build a request URL from an already-encoded path and query parameters
    pub(crate) fn url(&self, path: &str, query: &Query) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw)
            .map_err(|e| PsError::Config(format!("invalid request URL '{}': {}", raw, e)))?;
        if !query.0.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &query.0 {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    /// Add authentication and standard headers to a request builder
    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder
            .headers(self.default_headers.clone())
            .header(ACCEPT, "application/json")
            .header(
                USER_AGENT,
                format!("psctl/{} ({})", env!("CARGO_PKG_VERSION"), self.service_name),
            );
        self.authenticator.authenticate(builder)
    }

    pub(crate) fn get(&self, url: Url) -> reqwest::RequestBuilder {
        debug!("GET {}", url);
        self.with_headers(self.client.get(url))
    }

    pub(crate) fn post(&self, url: Url) -> reqwest::RequestBuilder {
        debug!("POST {}", url);
        self.with_headers(self.client.post(url))
    }

    pub(crate) fn patch(&self, url: Url) -> reqwest::RequestBuilder {
        debug!("PATCH {}", url);
        self.with_headers(self.client.patch(url))
    }

    pub(crate) fn delete(&self, url: Url) -> reqwest::RequestBuilder {
        debug!("DELETE {}", url);
        self.with_headers(self.client.delete(url))
    }

    /// Send a request and decode its JSON body
    ///
    /// A success status with an empty body yields `Ok(None)`.
    pub(crate) async fn send_json<T>(
        &self,
        builder: reqwest::RequestBuilder,
        error_context: &str,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body, error_context));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            debug!("Empty response body for {}", error_context);
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| PsError::Json(format!("Failed to parse {}: {}", error_context, e)))
    }

    /// Send a request whose response carries no body of interest
    pub(crate) async fn send_empty(
        &self,
        builder: reqwest::RequestBuilder,
        error_context: &str,
    ) -> Result<()> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(api_error(status.as_u16(), &body, error_context))
    }
}

/// Build an API error, preferring the message carried in the error body
fn api_error(status: u16, body: &[u8], error_context: &str) -> PsError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| error_message(&v))
        .unwrap_or_else(|| format!("Failed to fetch {}", error_context));
    PsError::Api { status, message }
}

fn error_message(body: &serde_json::Value) -> Option<String> {
    [
        &body["errors"][0]["message"],
        &body["message"],
        &body["error"],
        &body["errorMessage"],
    ]
    .into_iter()
    .find_map(|v| v.as_str().map(str::to_string))
}

/// Check that a service URL is absolute and strip any trailing slash
fn validate_service_url(url: &str) -> Result<String> {
    if url.is_empty() {
        return Err(PsError::Config("service URL is empty".to_string()));
    }
    Url::parse(url).map_err(|e| PsError::Config(format!("invalid service URL '{}': {}", url, e)))?;
    Ok(url.trim_end_matches('/').to_string())
}

/// Percent-encode a value for use as a single path segment
pub(crate) fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

/// Reject empty required parameters before any request is built
pub(crate) fn require(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PsError::invalid(format!("'{}' must not be empty", name)));
    }
    Ok(())
}

#[cfg(test)]
impl ServiceClient {
    /// Create a test client against a mock server
    pub fn test_client(base_url: &str) -> Self {
        Self::new(
            ServiceOptions::new("test_service")
                .with_url(base_url)
                .with_authenticator(Authenticator::BearerToken("test-token".to_string())),
            "https://unused.example.com",
        )
        .unwrap()
    }
}
