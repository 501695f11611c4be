//! Core error types.

use crate::bind::BindError;
use crate::categorize::CategorizeError;
use thiserror::Error;

/// Errors from the categorization and binding pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Source model assembly or lookup failed.
    #[error("model error: {0}")]
    Model(#[from] ormbind_model::ModelError),

    /// Hierarchy categorization failed.
    #[error("categorization error: {0}")]
    Categorize(#[from] CategorizeError),

    /// Relational binding failed.
    #[error("binding error: {0}")]
    Bind(#[from] BindError),
}
