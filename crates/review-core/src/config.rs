//! Host-level configuration.
//!
//! Configuration is plain data with defaults, so a host can load it from JSON and omit any field.
//!
//! ```
//! use review_core::ReviewConfig;
//!
//! let config = ReviewConfig::from_json(r#"{ "diff": { "lookahead": 4 } }"#).unwrap();
//! assert_eq!(config.diff.lookahead, 4);
//! assert_eq!(ReviewConfig::from_json("{}").unwrap(), ReviewConfig::default());
//! ```

use crate::diff::DiffOptions;
use crate::error::ReviewError;
use serde::{Deserialize, Serialize};

/// Configuration for a review host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Options for prompt diffs.
    pub diff: DiffOptions,
}

impl ReviewConfig {
    /// Parse a JSON configuration document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ReviewError> {
        Ok(serde_json::from_str(json)?)
    }
}
