//! Attribute nature classification.
//!
//! Every persistent member resolves to exactly one nature. Classification is
//! a pure function of the member's markers plus one registry lookup (is the
//! declared type embeddable), so repeated calls always agree.

use super::error::CategorizeError;
use ormbind_model::{ClassDetails, MarkerKind, MemberDetails, ModelRegistry};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// The five persistence natures an attribute can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AttributeNature {
    /// Single column value.
    Basic,
    /// Embeddable composite value.
    Embedded,
    /// Polymorphic discriminated value.
    Any,
    /// Association to one other entity.
    ToOne,
    /// Collection-valued association or element collection.
    Plural,
}

impl std::fmt::Display for AttributeNature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeNature::Basic => write!(f, "basic"),
            AttributeNature::Embedded => write!(f, "embedded"),
            AttributeNature::Any => write!(f, "any"),
            AttributeNature::ToOne => write!(f, "to-one"),
            AttributeNature::Plural => write!(f, "plural"),
        }
    }
}

const EXPLICIT_TO_ONE: &[MarkerKind] = &[MarkerKind::OneToOne, MarkerKind::ManyToOne];

const EXPLICIT_PLURAL: &[MarkerKind] = &[
    MarkerKind::OneToMany,
    MarkerKind::ManyToMany,
    MarkerKind::ElementCollection,
    MarkerKind::ManyToAny,
];

const IMPLIED_BASIC: &[MarkerKind] = &[
    MarkerKind::Temporal,
    MarkerKind::Lob,
    MarkerKind::Enumerated,
    MarkerKind::Convert,
    MarkerKind::Version,
    MarkerKind::Generated,
    MarkerKind::Nationalized,
    MarkerKind::UserType,
    MarkerKind::TenantId,
];

const IMPLIED_EMBEDDED: &[MarkerKind] = &[
    MarkerKind::EmbeddableInstantiator,
    MarkerKind::CompositeUserType,
];

const IMPLIED_ANY: &[MarkerKind] = &[MarkerKind::AnyDiscriminator, MarkerKind::AnyDiscriminatorValue];

fn has_any(member: &MemberDetails, kinds: &[MarkerKind]) -> bool {
    kinds.iter().any(|&k| member.has(k))
}

/// Classify one member into its attribute nature.
///
/// Explicit markers always count. Markers that merely imply a nature are
/// only consulted when no explicit plural marker is present: a convertible
/// element collection is still a collection. Zero signals default to basic;
/// two or more distinct natures are a hard error.
pub fn classify_member(
    registry: &ModelRegistry,
    class: &ClassDetails,
    member: &MemberDetails,
) -> Result<AttributeNature, CategorizeError> {
    let mut natures = BTreeSet::new();

    if member.has(MarkerKind::Basic) {
        natures.insert(AttributeNature::Basic);
    }
    if member.has(MarkerKind::Embedded)
        || member.has(MarkerKind::EmbeddedId)
        || is_embeddable_typed(registry, member)
    {
        natures.insert(AttributeNature::Embedded);
    }
    if member.has(MarkerKind::Any) {
        natures.insert(AttributeNature::Any);
    }
    if has_any(member, EXPLICIT_TO_ONE) {
        natures.insert(AttributeNature::ToOne);
    }
    let explicit_plural = has_any(member, EXPLICIT_PLURAL);
    if explicit_plural {
        natures.insert(AttributeNature::Plural);
    }

    if !explicit_plural {
        if has_any(member, IMPLIED_BASIC) {
            natures.insert(AttributeNature::Basic);
        }
        if has_any(member, IMPLIED_EMBEDDED) {
            natures.insert(AttributeNature::Embedded);
        }
        if has_any(member, IMPLIED_ANY) {
            natures.insert(AttributeNature::Any);
        }
    }

    let mut natures = natures.into_iter();
    match (natures.next(), natures.next()) {
        (None, _) => {
            debug!(
                class = %class.name,
                member = %member.name,
                "no nature signals, defaulting to basic"
            );
            Ok(AttributeNature::Basic)
        }
        (Some(nature), None) => Ok(nature),
        (Some(first), Some(second)) => {
            let mut all = vec![first, second];
            all.extend(natures);
            Err(CategorizeError::AmbiguousNature {
                class: class.name.clone(),
                member: member.name.clone(),
                natures: all,
            })
        }
    }
}

fn is_embeddable_typed(registry: &ModelRegistry, member: &MemberDetails) -> bool {
    member
        .type_name
        .as_deref()
        .and_then(|t| registry.resolve(t))
        .is_some_and(ClassDetails::is_embeddable)
}
