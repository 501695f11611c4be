//! ormbind - boot-time ORM metadata.
//!
//! Turns a declarative class model into relational mapping metadata in two
//! phases: [`categorize`] groups managed classes into entity hierarchies
//! with every attribute classified and hierarchy-wide facts resolved, and
//! [`bind`] maps those hierarchies onto tables, columns, and per-class
//! shapes.
//!
//! The source-model boundary types live in [`model`]; the bound schema
//! objects live in [`schema`].
//!
//! ```
//! use ormbind::model::{ClassDetails, Marker, MemberDetails, ModelRegistry};
//!
//! let mut registry = ModelRegistry::new();
//! registry.add_class(
//!     ClassDetails::new("Payment")
//!         .with_marker(Marker::Entity { name: None })
//!         .with_field(MemberDetails::field("id").with_marker(Marker::Id))
//!         .with_field(MemberDetails::field("amount")),
//! )?;
//!
//! let categorized = ormbind::categorize(&registry)?;
//! let bound = ormbind::bind(&categorized, &ormbind::BindOptions::default())?;
//!
//! let payment = bound.type_binding("Payment").unwrap();
//! assert!(payment.is_root());
//! assert!(payment.property("amount").is_some());
//! # Ok::<(), ormbind::Error>(())
//! ```

pub use ormbind_core::bind::{bind, BindError, BindOptions, DefaultNaming, NamingStrategy};
pub use ormbind_core::categorize::{
    categorize, AttributeNature, CategorizeError, CategorizedModel, EntityHierarchy,
};
pub use ormbind_core::error::Error;
pub use ormbind_core::schema::{self, BoundModel};

/// Source-model boundary types: classes, members, and markers.
pub use ormbind_model as model;
