/*
Inputs:

    <rules_dir>/<component>.toon (one rule resource per component kind)

    or rule sets already materialized in memory

Outputs:

    RuleSet for the component, or None when no resource exists

Resource layout:

    rules:
      uri:
        field: TEXT
        name: URI
      noop:
        ref: NOOP_CHECK
*/
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::config::MapperConfig;
use crate::errors::RuleLoadError;
use crate::mapping::rules::{MappingRule, RuleSet};

/// Where a component's mapping rules come from.
///
/// `Ok(None)` means the component has no rule resource; that is not an error.
pub trait RuleSource {
    fn load(&self, component: &str) -> Result<Option<RuleSet>, RuleLoadError>;
}

impl<S: RuleSource + ?Sized> RuleSource for &S {
    fn load(&self, component: &str) -> Result<Option<RuleSet>, RuleLoadError> {
        (**self).load(component)
    }
}

/// Rule sets registered up front, keyed by component name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRuleSource {
    sets: HashMap<String, RuleSet>,
}

impl InMemoryRuleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, component: impl Into<String>, rules: RuleSet) -> Self {
        self.sets.insert(component.into(), rules);
        self
    }
}

impl RuleSource for InMemoryRuleSource {
    fn load(&self, component: &str) -> Result<Option<RuleSet>, RuleLoadError> {
        Ok(self.sets.get(component).cloned())
    }
}

/// Reads `<dir>/<component>.<extension>` TOON documents.
#[derive(Debug, Clone)]
pub struct DirectoryRuleSource {
    dir: PathBuf,
    extension: String,
}

#[derive(Debug, Deserialize)]
struct RuleDocument {
    #[serde(default)]
    rules: HashMap<String, MappingRule>,
}

impl DirectoryRuleSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: "toon".to_string(),
        }
    }

    pub fn from_config(config: &MapperConfig) -> Self {
        Self {
            dir: config.rules_dir.clone(),
            extension: config.rules_extension.clone(),
        }
    }

    pub fn path_for(&self, component: &str) -> PathBuf {
        self.dir.join(format!("{component}.{}", self.extension))
    }
}

impl RuleSource for DirectoryRuleSource {
    fn load(&self, component: &str) -> Result<Option<RuleSet>, RuleLoadError> {
        let path = self.path_for(component);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no mapping rule resource");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        parse_rules(component, &text).map(Some)
    }
}

/// Decode a TOON rule document into a rule set.
pub fn parse_rules(component: &str, text: &str) -> Result<RuleSet, RuleLoadError> {
    let doc: RuleDocument =
        toon_format::decode_default(text).map_err(|err| RuleLoadError::Parse {
            component: component.to_string(),
            reason: err.to_string(),
        })?;
    Ok(doc.rules.into_iter().collect())
}
