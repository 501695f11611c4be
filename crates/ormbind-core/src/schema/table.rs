//! Bound tables.

use super::column::Column;
use serde::Serialize;

/// Index of a table within the bound model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TableId(pub(crate) usize);

/// How a table comes to exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TableKind {
    /// A regular physical table.
    Physical,
    /// A virtual table backed by a query expression.
    Derived { query: String },
    /// A secondary table joined to an owning entity's primary table.
    Secondary { owner: String },
    /// A table-per-class table. Columns of the included table belong to
    /// this table by reference instead of being copied in.
    Union { included: TableId },
}

/// One bound table: name pair, kind, columns, and primary key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Name as declared in the source model.
    pub logical_name: String,
    /// Name after the naming strategy has applied.
    pub physical_name: String,
    pub kind: TableKind,
    pub columns: Vec<Column>,
    pub primary_key: PrimaryKey,
}

/// Primary key of a table, as indices into its column list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrimaryKey {
    pub columns: Vec<usize>,
}

impl Table {
    pub(crate) fn new(
        logical_name: impl Into<String>,
        physical_name: impl Into<String>,
        kind: TableKind,
    ) -> Self {
        Self {
            logical_name: logical_name.into(),
            physical_name: physical_name.into(),
            kind,
            columns: Vec::new(),
            primary_key: PrimaryKey::default(),
        }
    }

    /// Add a column and return its index.
    pub(crate) fn add_column(&mut self, column: Column) -> usize {
        self.columns.push(column);
        self.columns.len() - 1
    }

    /// Look up a directly owned column by name. Union tables resolve
    /// inherited columns through [`BoundModel::column_in_family`] instead.
    ///
    /// [`BoundModel::column_in_family`]: crate::schema::BoundModel::column_in_family
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The columns making up the primary key, in key order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.primary_key.columns.iter().map(|&i| &self.columns[i])
    }
}
