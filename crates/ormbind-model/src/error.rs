//! Model-level errors.

use thiserror::Error;

/// Errors raised while assembling or querying the source model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A class was registered twice under the same name.
    #[error("duplicate class in model: {name}")]
    DuplicateClass { name: String },

    /// A super-type or referenced class is missing from the registry.
    #[error("unknown class: {name}")]
    UnknownClass { name: String },
}
