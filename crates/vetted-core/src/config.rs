use crate::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("max_depth must be at least 1")]
    InvalidMaxDepth,

    #[error("invalid validator config: {0}")]
    Parse(String),
}

///
/// DeprecationPolicy
/// What happens when a value matches only through a deprecated literal.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeprecationPolicy {
    /// Accept silently.
    Allow,
    /// Treat the deprecated literal as not allowed.
    Reject,
    /// Accept and report a notice.
    #[default]
    Warn,
}

///
/// ValidatorConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    pub debug: bool,
    pub deprecated: DeprecationPolicy,
    pub max_depth: usize,
}

impl ValidatorConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            debug: false,
            deprecated: DeprecationPolicy::Warn,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn deprecated(mut self, policy: DeprecationPolicy) -> Self {
        self.deprecated = policy;
        self
    }

    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a config from TOML text, e.g.
    /// `deprecated = "reject"` or `max_depth = 16`.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if config.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth);
        }

        Ok(config)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///
