// config key -> structured parameter translation, driven by per-component rules
use std::sync::OnceLock;

use tracing::{debug, info, warn};

use crate::config::MapperConfig;
use crate::core::node::{ParameterTarget, StructuredParameter};
use crate::core::table::{TableSpec, aggregate_overflow};
use crate::core::types::{ConfigMap, FieldKind, UNIQUE_NAME, VALUE_TRUE};
use crate::mapping::generator::RuleSource;
use crate::mapping::rules::{MappingRule, RuleSet};

/// Hooks a component kind supplies to the translation engine.
pub trait ComponentMapping {
    /// Component name; also selects the rule resource.
    fn component_name(&self) -> &str;

    /// Reserved entries translated after the caller's configuration. An entry
    /// is skipped when the caller already supplied its key.
    fn additional_parameters(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Table parameters the component declares. Overflow entries are only
    /// aggregated when exactly one is declared.
    fn table_specifications(&self) -> Vec<TableSpec> {
        Vec::new()
    }

    /// Called for every key without both a field kind and a display name.
    fn handle_overflow(&self, node: &mut dyn ParameterTarget, key: &str, value: &str) {
        aggregate_overflow(node, &self.table_specifications(), key, value);
    }
}

/// Data-driven component: a name, its table declarations and reserved entries.
#[derive(Debug, Clone, Default)]
pub struct BasicComponent {
    name: String,
    tables: Vec<TableSpec>,
    additional: Vec<(String, String)>,
}

impl BasicComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_table(mut self, table: TableSpec) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_additional(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional.push((key.into(), value.into()));
        self
    }
}

impl ComponentMapping for BasicComponent {
    fn component_name(&self) -> &str {
        &self.name
    }

    fn additional_parameters(&self) -> Vec<(String, String)> {
        self.additional.clone()
    }

    fn table_specifications(&self) -> Vec<TableSpec> {
        self.tables.clone()
    }
}

/// Translates flat configuration into parameters for nodes of one component kind.
///
/// Rules are fetched from the source on first use and kept for the lifetime
/// of the handler. A missing or malformed resource is cached as "no rules",
/// which turns every later [`handle`](Self::handle) call into a no-op.
pub struct ParameterHandler<C, S> {
    component: C,
    source: S,
    identity_key: String,
    rules: OnceLock<Option<RuleSet>>,
}

impl<C: ComponentMapping, S: RuleSource> ParameterHandler<C, S> {
    pub fn new(component: C, source: S) -> Self {
        Self::with_config(component, source, &MapperConfig::default())
    }

    pub fn with_config(component: C, source: S, config: &MapperConfig) -> Self {
        Self {
            component,
            source,
            identity_key: config.identity_key.clone(),
            rules: OnceLock::new(),
        }
    }

    /// The component's rules, loading them on first call.
    pub fn rules(&self) -> Option<&RuleSet> {
        self.rules
            .get_or_init(|| {
                let component = self.component.component_name();
                match self.source.load(component) {
                    Ok(Some(rules)) => {
                        debug!(component, rules = rules.len(), "mapping rules loaded");
                        Some(rules)
                    }
                    Ok(None) => {
                        debug!(component, "no mapping rules; translation disabled");
                        None
                    }
                    Err(err) => {
                        warn!(component, error = %err, "mapping rules unusable; translation disabled");
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Translate `config` into parameters on `node`.
    ///
    /// Per entry, in order:
    /// - the identity key becomes `UNIQUE_NAME = node_id`, nothing else;
    /// - a reference target adds `<target> = "true"`;
    /// - a field kind plus display name adds one parameter carrying the raw value;
    /// - anything else goes to [`ComponentMapping::handle_overflow`].
    ///
    /// Direct parameters are appended after all entries are processed; table
    /// rows land on the node as they are aggregated.
    pub fn handle<N: ParameterTarget>(&self, node: &mut N, node_id: &str, config: &ConfigMap) {
        let component = self.component.component_name();
        info!(component, node = node_id, entries = config.len(), "translating node parameters");

        let Some(rules) = self.rules() else {
            return;
        };

        let additional = self.component.additional_parameters();
        let entries = config
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .chain(
                additional
                    .iter()
                    .filter(|(key, _)| !config.contains_key(key))
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );

        let mut params = Vec::new();
        for (key, value) in entries {
            if key == self.identity_key {
                params.push(StructuredParameter::new(FieldKind::Text, UNIQUE_NAME, node_id));
                continue;
            }

            let rule = rules.get(key);
            if let Some(target) = rule.and_then(|r| r.reference.as_deref()) {
                debug!(key, target, "reference flag set");
                params.push(StructuredParameter::new(FieldKind::Text, target, VALUE_TRUE));
            }

            match rule.and_then(MappingRule::direct_field) {
                Some((kind, name)) => {
                    debug!(key, %kind, name, "direct field");
                    params.push(StructuredParameter::new(kind, name, value));
                }
                None => self.component.handle_overflow(&mut *node, key, value),
            }
        }

        node.append_parameters(params);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::core::node::{ElementValue, Node};
    use crate::errors::RuleLoadError;
    use crate::mapping::generator::InMemoryRuleSource;

    fn config(entries: &[(&str, &str)]) -> ConfigMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn rules(pairs: &[(&str, &str)]) -> RuleSet {
        RuleSet::from_qualified(pairs.iter().copied()).unwrap()
    }

    fn handler(
        component: BasicComponent,
        set: RuleSet,
    ) -> ParameterHandler<BasicComponent, InMemoryRuleSource> {
        let source = InMemoryRuleSource::new().with_rules(component.component_name(), set);
        ParameterHandler::new(component, source)
    }

    struct CountingSource {
        loads: Cell<usize>,
        result: fn() -> Result<Option<RuleSet>, RuleLoadError>,
    }

    impl RuleSource for CountingSource {
        fn load(&self, _component: &str) -> Result<Option<RuleSet>, RuleLoadError> {
            self.loads.set(self.loads.get() + 1);
            (self.result)()
        }
    }

    #[test]
    fn plain_field_maps_to_one_parameter() {
        let h = handler(
            BasicComponent::new("cTimer"),
            rules(&[("period.FIELD", "TEXT"), ("period.NAME", "PERIOD")]),
        );
        let mut node = Node::new("cTimer_1");

        h.handle(&mut node, "cTimer_1", &config(&[("period", "1000")]));

        assert_eq!(
            node.parameters,
            vec![StructuredParameter::new(FieldKind::Text, "PERIOD", "1000")]
        );
    }

    #[test]
    fn identity_key_wins_over_rules() {
        let h = handler(
            BasicComponent::new("cTimer"),
            rules(&[("id.FIELD", "CHECK"), ("id.NAME", "ID"), ("id.REF", "HAS_ID")]),
        );
        let mut node = Node::new("cTimer_1");

        h.handle(&mut node, "cTimer_1", &config(&[("id", "ignored")]));

        assert_eq!(
            node.parameters,
            vec![StructuredParameter::new(FieldKind::Text, UNIQUE_NAME, "cTimer_1")]
        );
    }

    #[test]
    fn identity_key_is_configurable() {
        let source = InMemoryRuleSource::new().with_rules("cTimer", RuleSet::new());
        let settings = MapperConfig {
            identity_key: "nodeId".to_string(),
            ..MapperConfig::default()
        };
        let h = ParameterHandler::with_config(BasicComponent::new("cTimer"), source, &settings);
        let mut node = Node::new("n");

        h.handle(&mut node, "cTimer_7", &config(&[("nodeId", "x")]));

        assert_eq!(node.parameter(UNIQUE_NAME).unwrap().value.as_deref(), Some("cTimer_7"));
    }

    #[test]
    fn reference_flag_is_emitted_alongside_direct_field() {
        let h = handler(
            BasicComponent::new("cFile"),
            rules(&[
                ("charset.FIELD", "CLOSED_LIST"),
                ("charset.NAME", "ENCODING"),
                ("charset.REF", "SET_ENCODING"),
            ]),
        );
        let mut node = Node::new("cFile_1");

        h.handle(&mut node, "cFile_1", &config(&[("charset", "UTF-8")]));

        assert_eq!(
            node.parameters,
            vec![
                StructuredParameter::new(FieldKind::Text, "SET_ENCODING", "true"),
                StructuredParameter::new(FieldKind::ClosedList, "ENCODING", "UTF-8"),
            ]
        );
    }

    #[test]
    fn reference_only_key_falls_through_to_table() {
        let h = handler(
            BasicComponent::new("cFile").with_table(TableSpec::new("ADVARGUMENTS", "ARGUMENT", "VALUE")),
            rules(&[("noop.REF", "NOOP_CHECK")]),
        );
        let mut node = Node::new("cFile_1");

        h.handle(&mut node, "cFile_1", &config(&[("noop", "v")]));

        // table row lands immediately, the flag is appended at the end
        assert_eq!(node.parameters.len(), 2);
        assert_eq!(node.parameters[0].kind, FieldKind::Table);
        assert_eq!(
            node.parameters[0].rows[0].cells,
            vec![ElementValue::new("ARGUMENT", "noop"), ElementValue::new("VALUE", "v")]
        );
        assert_eq!(
            node.parameters[1],
            StructuredParameter::new(FieldKind::Text, "NOOP_CHECK", "true")
        );
    }

    #[test]
    fn reference_only_key_without_table_emits_flag_only() {
        let h = handler(BasicComponent::new("cFile"), rules(&[("noop.REF", "NOOP_CHECK")]));
        let mut node = Node::new("cFile_1");

        h.handle(&mut node, "cFile_1", &config(&[("noop", "v")]));

        assert_eq!(
            node.parameters,
            vec![StructuredParameter::new(FieldKind::Text, "NOOP_CHECK", "true")]
        );
    }

    #[test]
    fn field_without_name_is_overflow() {
        let h = handler(BasicComponent::new("cFile"), rules(&[("half.FIELD", "TEXT")]));
        let mut node = Node::new("cFile_1");

        h.handle(&mut node, "cFile_1", &config(&[("half", "x")]));

        assert!(node.parameters.is_empty());
    }

    #[test]
    fn missing_rules_leave_node_untouched() {
        let source = InMemoryRuleSource::new();
        let h = ParameterHandler::new(
            BasicComponent::new("cUnknown").with_table(TableSpec::new("T", "K", "V")),
            source,
        );
        let mut node = Node::new("n");
        node.append_parameters(vec![StructuredParameter::new(FieldKind::Text, "KEEP", "1")]);

        h.handle(&mut node, "n", &config(&[("id", "n"), ("anything", "1")]));

        assert_eq!(
            node.parameters,
            vec![StructuredParameter::new(FieldKind::Text, "KEEP", "1")]
        );
    }

    #[test]
    fn failed_load_is_cached() {
        let source = CountingSource {
            loads: Cell::new(0),
            result: || {
                Err(RuleLoadError::Parse {
                    component: "cFile".to_string(),
                    reason: "bad".to_string(),
                })
            },
        };
        let h = ParameterHandler::new(BasicComponent::new("cFile"), source);
        let mut node = Node::new("n");

        h.handle(&mut node, "n", &config(&[("a", "1")]));
        h.handle(&mut node, "n", &config(&[("b", "2")]));

        assert!(node.parameters.is_empty());
        assert_eq!(h.source.loads.get(), 1);
    }

    #[test]
    fn successful_load_is_cached() {
        let source = CountingSource {
            loads: Cell::new(0),
            result: || Ok(Some(RuleSet::from_qualified([("a.FIELD", "TEXT"), ("a.NAME", "A")]).unwrap())),
        };
        let h = ParameterHandler::new(BasicComponent::new("cFile"), source);

        for _ in 0..3 {
            let mut node = Node::new("n");
            h.handle(&mut node, "n", &config(&[("a", "1")]));
            assert_eq!(node.parameters.len(), 1);
        }
        assert_eq!(h.source.loads.get(), 1);
    }

    #[test]
    fn additional_parameters_follow_caller_entries_unless_overridden() {
        let h = handler(
            BasicComponent::new("cMessagingEndpoint")
                .with_additional("protocol", "file")
                .with_additional("mode", "poll"),
            rules(&[
                ("protocol.FIELD", "TEXT"),
                ("protocol.NAME", "PROTOCOL"),
                ("mode.FIELD", "RADIO"),
                ("mode.NAME", "MODE"),
            ]),
        );
        let mut node = Node::new("n");

        h.handle(&mut node, "n", &config(&[("mode", "push")]));

        assert_eq!(
            node.parameters,
            vec![
                StructuredParameter::new(FieldKind::Radio, "MODE", "push"),
                StructuredParameter::new(FieldKind::Text, "PROTOCOL", "file"),
            ]
        );
    }

    #[test]
    fn custom_overflow_hook_replaces_table_aggregation() {
        struct Collecting;

        impl ComponentMapping for Collecting {
            fn component_name(&self) -> &str {
                "cCustom"
            }

            fn handle_overflow(&self, node: &mut dyn ParameterTarget, key: &str, value: &str) {
                let name = format!("EXTRA_{}", key.to_uppercase());
                node.append_parameters(vec![StructuredParameter::new(FieldKind::Text, name, value)]);
            }
        }

        let source = InMemoryRuleSource::new().with_rules("cCustom", RuleSet::new());
        let h = ParameterHandler::new(Collecting, source);
        let mut node = Node::new("n");

        h.handle(&mut node, "n", &config(&[("depth", "3")]));

        assert_eq!(
            node.parameters,
            vec![StructuredParameter::new(FieldKind::Text, "EXTRA_DEPTH", "3")]
        );
    }
}
