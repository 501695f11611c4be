//! The bound relational model.

use super::binding::{BindingId, TypeBinding};
use super::column::Column;
use super::table::{Table, TableId, TableKind};
use serde::Serialize;

/// Everything binding produced: tables and per-type bindings, each in
/// binding order (supers before subs within a hierarchy).
#[derive(Debug, Serialize)]
pub struct BoundModel {
    tables: Vec<Table>,
    types: Vec<TypeBinding>,
}

impl BoundModel {
    pub(crate) fn new(tables: Vec<Table>, types: Vec<TypeBinding>) -> Self {
        Self { tables, types }
    }

    pub fn table(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }

    /// All tables with their ids, in creation order.
    pub fn tables(&self) -> impl Iterator<Item = (TableId, &Table)> {
        self.tables.iter().enumerate().map(|(i, t)| (TableId(i), t))
    }

    /// Find a table by its logical name.
    pub fn table_by_name(&self, logical_name: &str) -> Option<(TableId, &Table)> {
        self.tables()
            .find(|(_, t)| t.logical_name == logical_name)
    }

    pub fn binding(&self, id: BindingId) -> &TypeBinding {
        &self.types[id.0]
    }

    /// All type bindings with their ids, in binding order.
    pub fn types(&self) -> impl Iterator<Item = (BindingId, &TypeBinding)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, b)| (BindingId(i), b))
    }

    /// Find a type binding by source class name.
    pub fn type_binding(&self, class: &str) -> Option<&TypeBinding> {
        self.types.iter().find(|b| b.class == class)
    }

    /// Look up a column by name on a table, following union inclusion so a
    /// table-per-class table resolves columns it inherits by reference.
    pub fn column_in_family(&self, id: TableId, name: &str) -> Option<&Column> {
        let mut current = id;
        loop {
            let table = self.table(current);
            if let Some(column) = table.column(name) {
                return Some(column);
            }
            match table.kind {
                TableKind::Union { included } => current = included,
                _ => return None,
            }
        }
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}
