//! Graph configuration: site origin, HTTP settings and the multivalued set.
//!
//! Every field has a default, so an empty JSON object is a valid config file.

use crate::error::{ResolveError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides [`GraphConfig::base_url`].
pub const BASE_URL_ENV: &str = "WIKITREE_BASE_URL";

/// Default site origin profiles are resolved against.
pub const DEFAULT_BASE_URL: &str = "https://www.wikitree.com";

/// Attribute names that stay lists even with a single value.
pub const DEFAULT_MULTIVALUED: &[&str] = &["parent", "spouse", "sibling", "children", "marriage"];

/// Settings shared by every node of a [`Graph`](crate::Graph).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Origin that site-relative paths and bare identifiers resolve against.
    pub base_url: String,
    /// `User-Agent` header sent with every fetch.
    pub user_agent: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Always-multivalued attribute names.
    pub multivalued: Vec<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("wikitree-graph/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: 30_000,
            multivalued: DEFAULT_MULTIVALUED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GraphConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ResolveError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            ResolveError::Config(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Default config with the `WIKITREE_BASE_URL` override applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of this config.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base) = std::env::var(BASE_URL_ENV) {
            if !base.trim().is_empty() {
                self.base_url = base.trim().to_string();
            }
        }
        self
    }

    /// Replace the site origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
