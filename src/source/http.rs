//! HTTP page source
//!
//! Fetches pages from a JSON REST endpoint. The page token is threaded
//! through a query parameter and the next token is read back out of the
//! response body by dot-path.

use super::PageSource;
use crate::error::{Error, Result};
use crate::types::{Item, Page, PageToken};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Configuration for an HTTP page source
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request path appended to the base URL
    pub path: String,
    /// Query parameter carrying the page token
    pub token_param: String,
    /// Dot-path to the items array in the response body
    pub items_path: String,
    /// Dot-path to the next page token in the response body
    pub next_token_path: String,
    /// Extra query parameters sent with every request
    pub params: HashMap<String, String>,
    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            path: String::new(),
            token_param: "page".to_string(),
            items_path: "items".to_string(),
            next_token_path: "next_page".to_string(),
            params: HashMap::new(),
            headers: HashMap::new(),
            timeout: Duration::from_secs(30),
            user_agent: format!("pagefeed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpSourceConfig {
    /// Create a new config builder
    pub fn builder() -> HttpSourceConfigBuilder {
        HttpSourceConfigBuilder::default()
    }
}

/// Builder for HTTP source config
#[derive(Default)]
pub struct HttpSourceConfigBuilder {
    config: HttpSourceConfig,
}

impl HttpSourceConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the query parameter carrying the page token
    pub fn token_param(mut self, param: impl Into<String>) -> Self {
        self.config.token_param = param.into();
        self
    }

    /// Set the dot-path to the items array
    pub fn items_path(mut self, path: impl Into<String>) -> Self {
        self.config.items_path = path.into();
        self
    }

    /// Set the dot-path to the next page token
    pub fn next_token_path(mut self, path: impl Into<String>) -> Self {
        self.config.next_token_path = path.into();
        self
    }

    /// Add a fixed query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.params.insert(key.into(), value.into());
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpSourceConfig {
        self.config
    }
}

/// Page source backed by a JSON REST endpoint.
///
/// Each fetch is a single GET; any transport, status, or decoding failure
/// resolves the request with an error. There is no retry and no rate
/// limiting here; triggering policy belongs to the caller.
pub struct HttpSource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpSource {
    /// Create a source from its configuration.
    ///
    /// Fails if the base URL does not parse.
    pub fn new(config: HttpSourceConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// The configuration this source was built from
    pub fn config(&self) -> &HttpSourceConfig {
        &self.config
    }

    fn build_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = self.config.path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn parse_page(&self, body: &Value) -> Result<Page> {
        let items_value = extract_path(body, &self.config.items_path).ok_or_else(|| {
            Error::decode(format!("items not found at '{}'", self.config.items_path))
        })?;
        let raw_items = items_value
            .as_array()
            .ok_or_else(|| Error::decode(format!("'{}' is not an array", self.config.items_path)))?;
        let items = raw_items
            .iter()
            .map(|value| serde_json::from_value(value.clone()))
            .collect::<std::result::Result<Vec<Item>, _>>()?;

        let next_token = extract_path(body, &self.config.next_token_path).and_then(value_to_token);

        // Fetch order is assigned by the cache on append.
        Ok(Page {
            index: 0,
            items,
            next_token,
        })
    }
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch_page(&self, token: &PageToken) -> Result<Page> {
        let url = self.build_url();

        let mut query: Vec<(&str, &str)> = self
            .config
            .params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        query.push((self.config.token_param.as_str(), token.as_str()));

        let mut request = self.client.get(&url).query(&query);
        for (key, value) in &self.config.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        debug!(%url, token = token.as_str(), "fetching page");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::decode(format!("invalid JSON body: {e}")))?;
        self.parse_page(&body)
    }
}

/// Extract a JSON value by dot-path (`"data.next"`), tolerating a leading
/// `$.` prefix.
fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let mut current = value;
    for part in path.split('.') {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Interpret a JSON value as a page token. Null, empty strings, and
/// non-scalar values mean "no further pages".
fn value_to_token(value: &Value) -> Option<PageToken> {
    match value {
        Value::String(s) if !s.is_empty() => Some(PageToken::new(s.as_str())),
        Value::Number(n) => Some(PageToken::new(n.to_string())),
        _ => None,
    }
}
