//! Source-model boundary types for the ormbind pipeline.
//!
//! This crate defines the declarative class model consumed by `ormbind-core`:
//! classes, their fields and methods, and the persistence markers attached to
//! them. Everything here is plain serde-capable data so that scanners and
//! override-document readers can produce it from any source. Markers from an
//! override document are materialized as the same [`Marker`] values a scanner
//! emits, which is what makes the two origins indistinguishable downstream.
//!
//! # Modules
//!
//! - [`access`] - Field vs. property access
//! - [`marker`] - The persistence marker vocabulary
//! - [`member`] - Fields and methods carrying markers
//! - [`class`] - Class descriptors and super-type links
//! - [`registry`] - The ordered class registry the pipeline walks
//! - [`error`] - Model-level errors

pub mod access;
pub mod class;
pub mod error;
pub mod marker;
pub mod member;
pub mod registry;

pub use access::AccessKind;
pub use class::ClassDetails;
pub use error::ModelError;
pub use marker::{
    CacheAccess, CallbackEvent, ColumnSpec, InheritanceKind, Marker, MarkerKind,
    OptimisticLockStyle,
};
pub use member::{MemberDetails, MemberKind};
pub use registry::ModelRegistry;
