//! Relational binding for ormbind.
//!
//! Consumes a [`CategorizedModel`](crate::categorize::CategorizedModel) and
//! produces the bound schema objects in [`crate::schema`]. Binding runs in
//! two passes: a skeleton pass registers every type binding and its tables
//! in arena order, then deferred table- and value-level steps drain to
//! resolve everything cross-referential.

mod attribute;
mod binder;
mod error;
mod identifier;
mod naming;
mod second_pass;
mod state;
mod table;

pub use binder::bind;
pub use error::BindError;
pub use naming::{BindOptions, DefaultNaming, NamingStrategy};
