// overflow aggregation into a component's two-column table parameter
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::node::{ParameterTarget, StructuredParameter, TableRow};

/// A table parameter a component declares: its name and its two column references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    pub columns: [String; 2],
}

impl TableSpec {
    pub fn new(
        name: impl Into<String>,
        key_column: impl Into<String>,
        value_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: [key_column.into(), value_column.into()],
        }
    }
}

/// Record an overflow `(key, value)` as one row of the component's table parameter.
///
/// Only components declaring exactly one table are handled; otherwise the
/// entry is dropped. The table parameter is created on first use and
/// extended in place afterwards, so rows accumulate across calls on the same
/// node (re-running the same entry appends a duplicate row).
pub fn aggregate_overflow(
    node: &mut dyn ParameterTarget,
    tables: &[TableSpec],
    key: &str,
    value: &str,
) {
    let [table] = tables else {
        info!(
            key,
            tables = tables.len(),
            "overflow entry dropped: component must declare exactly one table"
        );
        return;
    };

    let row = TableRow::pair(&table.columns, key, value);
    match node.find_table_mut(&table.name) {
        Some(existing) => {
            debug!(table = %table.name, key, "appending row to existing table");
            existing.append_rows([row]);
        }
        None => {
            debug!(table = %table.name, key, "creating table parameter");
            node.append_parameters(vec![StructuredParameter::table(
                table.name.as_str(),
                vec![row],
            )]);
        }
    }
}
