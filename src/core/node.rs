// node parameter model + mutation API used by the translation engine
use serde::{Deserialize, Serialize};

use crate::core::types::FieldKind;

/// One cell of a table parameter: the column it belongs to and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementValue {
    pub element_ref: String,
    pub value: String,
}

impl ElementValue {
    pub fn new(element_ref: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            element_ref: element_ref.into(),
            value: value.into(),
        }
    }
}

/// One row of a table parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<ElementValue>,
}

impl TableRow {
    /// Two-column row: `(columns[0], first)` and `(columns[1], second)`.
    pub fn pair(columns: &[String; 2], first: &str, second: &str) -> Self {
        Self {
            cells: vec![
                ElementValue::new(columns[0].as_str(), first),
                ElementValue::new(columns[1].as_str(), second),
            ],
        }
    }
}

/// A typed parameter attached to a node.
///
/// Table parameters carry `rows` and no scalar `value`; every other kind
/// carries a `value` and no rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredParameter {
    pub kind: FieldKind,
    pub name: String,
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<TableRow>,
}

impl StructuredParameter {
    pub fn new(kind: FieldKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: Some(value.into()),
            rows: Vec::new(),
        }
    }

    pub fn table(name: impl Into<String>, rows: Vec<TableRow>) -> Self {
        Self {
            kind: FieldKind::Table,
            name: name.into(),
            value: None,
            rows,
        }
    }

    pub fn append_rows(&mut self, rows: impl IntoIterator<Item = TableRow>) {
        self.rows.extend(rows);
    }
}

/// What the engine needs from the node it configures. Existing parameters are
/// never removed or reordered through this API.
pub trait ParameterTarget {
    fn append_parameters(&mut self, params: Vec<StructuredParameter>);

    fn find_parameter_mut(&mut self, name: &str) -> Option<&mut StructuredParameter>;

    /// The `TABLE`-kind parameter with this name; other kinds sharing the name are skipped.
    fn find_table_mut(&mut self, name: &str) -> Option<&mut StructuredParameter>;
}

/// A processing-node instance and its parameter collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub parameters: Vec<StructuredParameter>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parameters: Vec::new(),
        }
    }

    /// First parameter with this name, if any.
    pub fn parameter(&self, name: &str) -> Option<&StructuredParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn parameters_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a StructuredParameter> + 'a {
        self.parameters.iter().filter(move |p| p.name == name)
    }
}

impl ParameterTarget for Node {
    fn append_parameters(&mut self, params: Vec<StructuredParameter>) {
        self.parameters.extend(params);
    }

    fn find_parameter_mut(&mut self, name: &str) -> Option<&mut StructuredParameter> {
        self.parameters.iter_mut().find(|p| p.name == name)
    }

    fn find_table_mut(&mut self, name: &str) -> Option<&mut StructuredParameter> {
        self.parameters
            .iter_mut()
            .find(|p| p.kind == FieldKind::Table && p.name == name)
    }
}
