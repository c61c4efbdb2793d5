//! Typed mapping rules for one component kind.
//!
//! Rule resources describe each configuration key with up to three
//! properties: the field kind and display name of the parameter it becomes,
//! and the name of a reference flag its presence switches on. The flat
//! suffix-qualified form (`<key>.FIELD`, `<key>.NAME`, `<key>.REF`) is
//! compiled once into a [`MappingRule`] per base key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::types::FieldKind;
use crate::errors::RuleLoadError;

pub const FIELD_SUFFIX: &str = ".FIELD";
pub const NAME_SUFFIX: &str = ".NAME";
pub const REF_SUFFIX: &str = ".REF";

/// How one configuration key translates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRule {
    #[serde(default)]
    pub field: Option<FieldKind>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
}

impl MappingRule {
    /// Field kind and display name, when both are present.
    pub fn direct_field(&self) -> Option<(FieldKind, &str)> {
        match (self.field, self.name.as_deref()) {
            (Some(kind), Some(name)) => Some((kind, name)),
            _ => None,
        }
    }
}

/// All rules of a component, keyed by base configuration key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: HashMap<String, MappingRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile suffix-qualified pairs such as `("uri.FIELD", "TEXT")`.
    ///
    /// Keys without a known suffix are ignored. A field kind outside
    /// [`FieldKind`] makes the whole set malformed.
    pub fn from_qualified<K, V, I>(pairs: I) -> Result<Self, RuleLoadError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (qualified, value) in pairs {
            let qualified = qualified.as_ref();
            let value = value.into();
            if let Some(base) = qualified.strip_suffix(FIELD_SUFFIX) {
                let kind = parse_field_kind(base, &value)?;
                set.rule_entry(base).field = Some(kind);
            } else if let Some(base) = qualified.strip_suffix(NAME_SUFFIX) {
                set.rule_entry(base).name = Some(value);
            } else if let Some(base) = qualified.strip_suffix(REF_SUFFIX) {
                set.rule_entry(base).reference = Some(value);
            }
        }
        Ok(set)
    }

    pub fn insert(&mut self, key: impl Into<String>, rule: MappingRule) -> Option<MappingRule> {
        self.rules.insert(key.into(), rule)
    }

    pub fn get(&self, key: &str) -> Option<&MappingRule> {
        self.rules.get(key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn rule_entry(&mut self, base: &str) -> &mut MappingRule {
        self.rules.entry(base.to_string()).or_default()
    }
}

impl FromIterator<(String, MappingRule)> for RuleSet {
    fn from_iter<T: IntoIterator<Item = (String, MappingRule)>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

fn parse_field_kind(key: &str, value: &str) -> Result<FieldKind, RuleLoadError> {
    value.parse().map_err(|_| RuleLoadError::UnknownFieldKind {
        key: key.to_string(),
        value: value.to_string(),
    })
}
