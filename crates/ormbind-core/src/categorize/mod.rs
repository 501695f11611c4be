//! Hierarchy categorization for ormbind.
//!
//! Turns a flat [`ModelRegistry`](ormbind_model::ModelRegistry) into a set of
//! [`EntityHierarchy`] values: each root entity with its super- and sub-types,
//! every persistent attribute classified by nature, and hierarchy-scoped facts
//! (identifier, version, caching, inheritance) resolved exactly once.

mod attribute;
mod builder;
mod collector;
mod error;
mod hierarchy;
mod nature;
mod node;
mod walker;

pub use attribute::AttributeMetadata;
pub use builder::{categorize, CategorizedModel};
pub use error::CategorizeError;
pub use hierarchy::{CachePolicy, ConversionInfo, EntityHierarchy, IdentifierMapping};
pub use nature::{classify_member, AttributeNature};
pub use node::{EntityFacts, HierarchyRelation, NodeId, TypeArena, TypeKind, TypeNode};
