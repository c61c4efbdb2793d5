use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::RuleLoadError;

/// Flat configuration of one component instance, in caller order.
pub type ConfigMap = IndexMap<String, String>;

/// Parameter name that always carries the node identifier.
pub const UNIQUE_NAME: &str = "UNIQUE_NAME";

pub const VALUE_TRUE: &str = "true";

/// How a parameter value is edited and displayed by the model builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    Check,
    Text,
    Radio,
    Directory,
    ClosedList,
    Table,
}

impl FieldKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKind::Check => "CHECK",
            FieldKind::Text => "TEXT",
            FieldKind::Radio => "RADIO",
            FieldKind::Directory => "DIRECTORY",
            FieldKind::ClosedList => "CLOSED_LIST",
            FieldKind::Table => "TABLE",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = RuleLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "CHECK" => Ok(FieldKind::Check),
            "TEXT" => Ok(FieldKind::Text),
            "RADIO" => Ok(FieldKind::Radio),
            "DIRECTORY" => Ok(FieldKind::Directory),
            "CLOSED_LIST" => Ok(FieldKind::ClosedList),
            "TABLE" => Ok(FieldKind::Table),
            other => Err(RuleLoadError::UnknownFieldKind {
                key: String::new(),
                value: other.to_string(),
            }),
        }
    }
}
