//! Translates flat component configuration into typed node parameters.

/// Crate configuration.
pub mod config;
/// Parameter model, translation engine and table aggregation.
pub mod core;
/// Mapping rules and the sources they are loaded from.
pub mod mapping;

mod errors;

pub use config::MapperConfig;
pub use crate::core::mapping::{BasicComponent, ComponentMapping, ParameterHandler};
pub use crate::core::node::{ElementValue, Node, ParameterTarget, StructuredParameter, TableRow};
pub use crate::core::quote::{quote, unquote};
pub use crate::core::table::{TableSpec, aggregate_overflow};
pub use crate::core::types::{ConfigMap, FieldKind};
pub use errors::RuleLoadError;
pub use mapping::generator::{DirectoryRuleSource, InMemoryRuleSource, RuleSource};
pub use mapping::rules::{MappingRule, RuleSet};
