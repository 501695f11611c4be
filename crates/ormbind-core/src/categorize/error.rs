//! Categorization-specific error types.

use super::nature::AttributeNature;
use ormbind_model::ModelError;
use thiserror::Error;

/// Errors raised while categorizing the class graph.
#[derive(Debug, Error)]
pub enum CategorizeError {
    /// A class lookup against the registry failed.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// A member carries markers for two or more different natures.
    #[error("ambiguous nature for {class}.{member}: {natures:?}")]
    AmbiguousNature {
        class: String,
        member: String,
        /// Every nature signalled on the member, in canonical order.
        natures: Vec<AttributeNature>,
    },

    /// A lone identifier member resolved to a nature no identifier can have.
    #[error("identifier {class}.{member} has nature {nature}, expected basic or embedded")]
    UnexpectedIdentifierNature {
        class: String,
        member: String,
        nature: AttributeNature,
    },

    /// Neither an access marker nor an identifier member exists anywhere on
    /// the root chain.
    #[error("cannot determine access type for hierarchy of {class}")]
    UndeterminedAccessType { class: String },

    /// The hierarchy declares no identifier member at all.
    #[error("no identifier member in hierarchy of {class}")]
    MissingIdentifier { class: String },

    /// A super-type chain loops back on itself.
    #[error("cyclic super-type chain involving {class}")]
    CyclicHierarchy { class: String },

    /// The root entity was never instantiated while walking its hierarchy.
    /// Indicates an inconsistent super-type chain in the source model.
    #[error("root entity {class} is unreachable from hierarchy root {root}")]
    UnreachableRootEntity { class: String, root: String },
}
