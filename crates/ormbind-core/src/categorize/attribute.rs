//! Resolved attribute metadata.

use super::error::CategorizeError;
use super::nature::{classify_member, AttributeNature};
use ormbind_model::{ClassDetails, MemberDetails, ModelRegistry};
use serde::Serialize;

/// One persistent attribute of a managed type, created once per backing
/// member during the hierarchy walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeMetadata {
    /// Attribute name, as supplied by the backing member.
    pub name: String,
    pub nature: AttributeNature,
    /// Name of the class that declares the backing member.
    pub declared_by: String,
    /// The backing member, with its markers.
    pub member: MemberDetails,
}

impl AttributeMetadata {
    pub(crate) fn resolve(
        registry: &ModelRegistry,
        class: &ClassDetails,
        member: &MemberDetails,
    ) -> Result<Self, CategorizeError> {
        let nature = classify_member(registry, class, member)?;
        Ok(Self {
            name: member.name.clone(),
            nature,
            declared_by: class.name.clone(),
            member: member.clone(),
        })
    }
}
