// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket compatibility settings.
//!
//! Settings are stored as RON, like the rest of the editor's project files.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How typed and untyped sockets may be mixed on one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MixingPolicy {
    /// A typed socket never connects to an untyped one
    #[default]
    Strict,
    /// Any connection with an untyped endpoint is allowed
    Permissive,
}

/// Settings for a sockets plugin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketsConfig {
    /// Typed/untyped mixing policy
    pub mixing: MixingPolicy,
}

impl SocketsConfig {
    /// Settings with the permissive mixing policy
    pub fn permissive() -> Self {
        Self {
            mixing: MixingPolicy::Permissive,
        }
    }

    /// Parse settings from a RON document
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(content)?)
    }

    /// Serialize settings to pretty-printed RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let config = ron::ser::PrettyConfig::default();
        Ok(ron::ser::to_string_pretty(self, config)?)
    }
}

/// Settings load/save errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed RON document
    #[error("Failed to parse socket settings: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serialization failure
    #[error("Failed to serialize socket settings: {0}")]
    Serialize(#[from] ron::Error),
}
