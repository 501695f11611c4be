//! Bound columns.

use super::table::TableId;
use ormbind_model::ColumnSpec;
use serde::Serialize;

/// One bound relational column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name, after overrides and the naming strategy have applied.
    pub name: String,
    pub nullable: bool,
    pub unique: bool,
    /// Length for character columns.
    pub length: Option<u32>,
    /// Precision for numeric columns.
    pub precision: Option<u8>,
    /// Scale for numeric columns.
    pub scale: Option<u8>,
    /// Verbatim DDL fragment overriding the derived definition.
    pub sql_definition: Option<String>,
}

impl Column {
    /// A plain nullable column with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: true,
            unique: false,
            length: None,
            precision: None,
            scale: None,
            sql_definition: None,
        }
    }

    /// A column carrying the constraints of an explicit column spec. The
    /// name is decided by the caller; override and naming precedence is not
    /// this type's business.
    pub(crate) fn from_spec(name: impl Into<String>, spec: &ColumnSpec) -> Self {
        Self {
            name: name.into(),
            nullable: spec.nullable,
            unique: spec.unique,
            length: spec.length,
            precision: spec.precision,
            scale: spec.scale,
            sql_definition: spec.definition.clone(),
        }
    }

    pub(crate) fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Address of a column: owning table plus position in its column list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnRef {
    pub table: TableId,
    pub index: usize,
}
