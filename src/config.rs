//! Router configuration.
//!
//! Can be built in code with the builder-style setters or loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Reject patterns with segments after `*`. When off, the rest of the
    /// pattern is dropped with a warning.
    pub strict_wildcard: bool,
    /// Number of `Params` sinks the dispatch pool keeps around.
    pub pool_size: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            strict_wildcard: true,
            pool_size: 128,
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from JSON. Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, RouterError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn strict_wildcard(mut self, strict: bool) -> Self {
        self.strict_wildcard = strict;
        self
    }

    pub fn pool_size(mut self, size: usize) -> Self {
        self.pool_size = size;
        self
    }
}
