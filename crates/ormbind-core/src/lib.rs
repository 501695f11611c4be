//! ormbind core - hierarchy categorization and relational binding.
//!
//! This crate turns a declarative class model into relational mapping
//! metadata in two phases:
//!
//! 1. [`categorize`] walks the class graph, groups managed types into entity
//!    hierarchies, classifies every attribute, and resolves hierarchy-wide
//!    facts (inheritance strategy, identifier shape, caching, locking).
//! 2. [`bind`] maps the categorized model onto tables, columns, and
//!    per-class shapes, deferring value-level work into an explicit second
//!    pass so that cross-type references always resolve.

pub mod bind;
pub mod categorize;
pub mod error;
pub mod schema;

pub use bind::{bind, BindOptions};
pub use categorize::{categorize, CategorizedModel, EntityHierarchy};
pub use error::Error;
pub use schema::BoundModel;
