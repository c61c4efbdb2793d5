use std::io;

use thiserror::Error;

/// Failure to turn a mapping rule resource into a usable rule set.
#[derive(Debug, Error)]
pub enum RuleLoadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("mapping rules for component '{component}' are malformed: {reason}")]
    Parse { component: String, reason: String },
    #[error("mapper configuration is malformed: {reason}")]
    Config { reason: String },
    #[error("rule '{key}' names unknown field kind '{value}'")]
    UnknownFieldKind { key: String, value: String },
}
