//! Field vs. property access.

use serde::{Deserialize, Serialize};

/// How persistent state is read from a managed class.
///
/// Resolved once per hierarchy (from an explicit [`Marker::Access`] or from
/// the placement of the identifier member) and inherited downward, with a
/// per-class override allowed.
///
/// [`Marker::Access`]: crate::marker::Marker::Access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    /// State lives in fields; fields back the attributes.
    Field,
    /// State is exposed through accessor methods; methods back the attributes.
    Property,
}
