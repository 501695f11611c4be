//! Naming strategy boundary.
//!
//! The binder derives implicit table and column names through this trait
//! and runs every logical name through it once to obtain the physical
//! name. Deployments with naming conventions plug in here.

use std::fmt;

/// Derives implicit names and maps logical names to physical ones.
pub trait NamingStrategy: fmt::Debug {
    /// Implicit primary-table name for an entity with no explicit table.
    fn table_name(&self, entity_name: &str) -> String;

    /// Implicit column name for an attribute with no explicit column.
    fn column_name(&self, attribute_name: &str) -> String;

    /// Physical rendering of a logical table name.
    fn physical_name(&self, logical_name: &str) -> String {
        logical_name.to_string()
    }
}

/// Pass-through naming: logical names are used verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNaming;

impl NamingStrategy for DefaultNaming {
    fn table_name(&self, entity_name: &str) -> String {
        entity_name.to_string()
    }

    fn column_name(&self, attribute_name: &str) -> String {
        attribute_name.to_string()
    }
}

/// Knobs for one binding run.
#[derive(Debug)]
pub struct BindOptions {
    pub naming: Box<dyn NamingStrategy>,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            naming: Box::new(DefaultNaming),
        }
    }
}

impl BindOptions {
    /// Replace the naming strategy.
    pub fn with_naming(mut self, naming: impl NamingStrategy + 'static) -> Self {
        self.naming = Box::new(naming);
        self
    }
}
