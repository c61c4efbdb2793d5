use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::RuleLoadError;

/// Engine-wide settings shared by every component handler.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Configuration key whose value is replaced by the node identifier.
    pub identity_key: String,
    /// Directory holding one rule resource per component.
    pub rules_dir: PathBuf,
    /// File extension of rule resources (without the dot).
    pub rules_extension: String,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            identity_key: "id".to_string(),
            rules_dir: PathBuf::from("mappings"),
            rules_extension: "toon".to_string(),
        }
    }
}

impl MapperConfig {
    /// Decode settings from a TOON document; absent fields keep their defaults.
    pub fn from_toon_str(text: &str) -> Result<Self, RuleLoadError> {
        toon_format::decode_default(text).map_err(|err| RuleLoadError::Config {
            reason: err.to_string(),
        })
    }
}
