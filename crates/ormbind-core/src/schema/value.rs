//! Bound values and properties.

use super::column::ColumnRef;
use serde::Serialize;

/// A bound value: what a property maps to at the relational level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// A single-column value.
    Basic(BasicValue),
    /// A composite value backed by an embeddable class.
    Component(ComponentValue),
}

/// A single-column value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicValue {
    pub column: ColumnRef,
    /// Declared type of the backing member, when known.
    pub type_name: Option<String>,
    /// Converter class applied between member and column.
    pub converter: Option<String>,
}

/// A composite value. Nested properties are bound when component binding
/// runs; a freshly created component starts as an empty shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentValue {
    /// The embeddable class backing the component, when known.
    pub class: Option<String>,
    pub properties: Vec<Property>,
}

/// A named, bound property of a type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: Value,
}

impl Property {
    pub(crate) fn basic(name: impl Into<String>, value: BasicValue) -> Self {
        Self {
            name: name.into(),
            value: Value::Basic(value),
        }
    }

    pub(crate) fn component(name: impl Into<String>, value: ComponentValue) -> Self {
        Self {
            name: name.into(),
            value: Value::Component(value),
        }
    }

    /// The single column behind this property, for basic values.
    pub fn column(&self) -> Option<ColumnRef> {
        match &self.value {
            Value::Basic(basic) => Some(basic.column),
            Value::Component(_) => None,
        }
    }
}
