//! Shared binding state.
//!
//! One mutable state object is threaded through every binder in turn.
//! Type bindings are registered here before their attributes bind, so
//! supertype lookups during attribute work always succeed.

use super::error::BindError;
use crate::schema::{BindingId, BoundModel, Table, TableId, TypeBinding};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct BindingState {
    tables: Vec<Table>,
    tables_by_name: HashMap<String, TableId>,
    types: Vec<TypeBinding>,
    types_by_class: HashMap<String, BindingId>,
}

impl BindingState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a table, reusing an existing one with the same logical name.
    pub(crate) fn add_table(&mut self, table: Table) -> TableId {
        if let Some(&id) = self.tables_by_name.get(&table.logical_name) {
            return id;
        }
        let id = TableId(self.tables.len());
        self.tables_by_name.insert(table.logical_name.clone(), id);
        self.tables.push(table);
        id
    }

    pub(crate) fn table(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }

    pub(crate) fn table_mut(&mut self, id: TableId) -> &mut Table {
        &mut self.tables[id.0]
    }

    /// Register a type binding under its source class name.
    pub(crate) fn register(&mut self, binding: TypeBinding) -> BindingId {
        let id = BindingId(self.types.len());
        self.types_by_class.insert(binding.class.clone(), id);
        self.types.push(binding);
        id
    }

    pub(crate) fn binding(&self, id: BindingId) -> &TypeBinding {
        &self.types[id.0]
    }

    pub(crate) fn binding_mut(&mut self, id: BindingId) -> &mut TypeBinding {
        &mut self.types[id.0]
    }

    pub(crate) fn binding_of(&self, class: &str) -> Option<BindingId> {
        self.types_by_class.get(class).copied()
    }

    /// A binding that must already exist; absence is a binder defect.
    pub(crate) fn expect_binding(&self, class: &str) -> Result<BindingId, BindError> {
        self.binding_of(class).ok_or_else(|| BindError::MissingBinding {
            class: class.to_string(),
        })
    }

    pub(crate) fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub(crate) fn type_count(&self) -> usize {
        self.types.len()
    }

    pub(crate) fn finish(self) -> BoundModel {
        BoundModel::new(self.tables, self.types)
    }
}
