//! Declarative source definitions
//!
//! A source definition is a small YAML document describing an HTTP page
//! source: where to fetch, how the token is sent, and where items and the
//! next token live in the response body.

use super::http::{HttpSource, HttpSourceConfig};
use crate::error::{Error, Result};
use crate::types::PageToken;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Declarative definition of an HTTP page source.
///
/// ```yaml
/// name: demo-items
/// base_url: http://localhost:4600
/// path: /items
/// token_param: page
/// start_token: "0"
/// items_path: items
/// next_token_path: next_page
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Human-readable source name
    pub name: String,

    /// Base URL of the item API
    pub base_url: String,

    /// Request path
    pub path: String,

    /// Query parameter carrying the page token
    #[serde(default = "default_token_param")]
    pub token_param: String,

    /// Token for the first fetch
    #[serde(default = "default_start_token")]
    pub start_token: String,

    /// Dot-path to the items array in the response body
    #[serde(default = "default_items_path")]
    pub items_path: String,

    /// Dot-path to the next page token in the response body
    #[serde(default = "default_next_token_path")]
    pub next_token_path: String,

    /// Extra query parameters sent with every request
    #[serde(default)]
    pub params: HashMap<String, String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_token_param() -> String {
    "page".to_string()
}

fn default_start_token() -> String {
    "0".to_string()
}

fn default_items_path() -> String {
    "items".to_string()
}

fn default_next_token_path() -> String {
    "next_page".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl SourceDefinition {
    /// Parse a definition from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let definition: Self = serde_yaml::from_str(yaml)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Load a definition from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Check definition invariants without touching the network
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_definition("name", "must not be empty"));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::invalid_definition("base_url", "must not be empty"));
        }
        url::Url::parse(&self.base_url)?;
        if self.token_param.trim().is_empty() {
            return Err(Error::invalid_definition("token_param", "must not be empty"));
        }
        if self.items_path.trim().is_empty() {
            return Err(Error::invalid_definition("items_path", "must not be empty"));
        }
        if self.next_token_path.trim().is_empty() {
            return Err(Error::invalid_definition(
                "next_token_path",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Build the HTTP source this definition describes
    pub fn build(&self) -> Result<HttpSource> {
        let mut builder = HttpSourceConfig::builder()
            .base_url(self.base_url.as_str())
            .path(self.path.as_str())
            .token_param(self.token_param.as_str())
            .items_path(self.items_path.as_str())
            .next_token_path(self.next_token_path.as_str())
            .timeout(Duration::from_secs(self.timeout_secs));
        for (key, value) in &self.params {
            builder = builder.param(key.as_str(), value.as_str());
        }
        for (key, value) in &self.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        HttpSource::new(builder.build())
    }

    /// Token for the first fetch
    pub fn start_token(&self) -> PageToken {
        PageToken::new(self.start_token.as_str())
    }
}
