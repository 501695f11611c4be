//! Binding errors.

use crate::categorize::AttributeNature;
use thiserror::Error;

/// Errors raised while binding a categorized model to relational objects.
#[derive(Debug, Error)]
pub enum BindError {
    /// A class declares both a physical table and a derived-query table.
    #[error("{class} declares both a table name and a derived table query")]
    ConflictingTableSources { class: String },

    /// A column targets a secondary table no binding in scope declares.
    #[error("{class}.{member} targets unknown secondary table {table}")]
    UnknownSecondaryTable {
        class: String,
        member: String,
        table: String,
    },

    /// Relation-valued attributes are not bindable yet.
    #[error("{class}.{member} has unsupported nature {nature}")]
    UnsupportedNature {
        class: String,
        member: String,
        nature: AttributeNature,
    },

    /// Multi-member identifiers are not bindable yet.
    #[error("{class} uses an unsupported non-aggregated identifier")]
    UnsupportedIdentifier { class: String },

    /// A lifecycle callback names a method its class does not declare.
    #[error("callback method {method} not found on {class}")]
    CallbackMethodNotFound { class: String, method: String },

    /// A mapped superclass with column-bearing attributes has no entity
    /// descendant to borrow a table from.
    #[error("mapped superclass {class} has no table for its attributes")]
    NoTableForMappedSuperclass { class: String },

    /// A value step ran before its type binding was registered. This is a
    /// binder defect, never a model error.
    #[error("no binding registered for {class}")]
    MissingBinding { class: String },

    /// Deferred steps were still incomplete after their single drain.
    #[error("{count} second-pass steps left unresolved: {}", steps.join("; "))]
    UnresolvedSecondPass { count: usize, steps: Vec<String> },
}
