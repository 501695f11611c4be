//! Entity hierarchy building.
//!
//! Discovers hierarchy roots in registration order, resolves the default
//! access for each root chain, and builds one [`EntityHierarchy`] per root.

use super::error::CategorizeError;
use super::hierarchy::EntityHierarchy;
use ormbind_model::{AccessKind, ClassDetails, Marker, MarkerKind, MemberDetails, ModelRegistry};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, instrument};

/// The categorized domain model: one hierarchy per root entity, in
/// registration order.
#[derive(Debug, Serialize)]
pub struct CategorizedModel {
    pub hierarchies: Vec<EntityHierarchy>,
}

impl CategorizedModel {
    /// The hierarchy containing the given class, if any.
    pub fn hierarchy_of(&self, class: &str) -> Option<&EntityHierarchy> {
        self.hierarchies.iter().find(|h| h.contains(class))
    }
}

/// Categorize a class graph into entity hierarchies.
///
/// A root entity is an entity whose super-type chain contains no other
/// entity; mapped superclasses and non-managed classes are transparent for
/// that test.
#[instrument(skip_all)]
pub fn categorize(registry: &ModelRegistry) -> Result<CategorizedModel, CategorizeError> {
    let mut roots = Vec::new();
    for class in registry.classes() {
        if class.is_entity() && !has_entity_ancestor(registry, class)? {
            roots.push(class);
        }
    }
    let all_roots: HashSet<String> = roots.iter().map(|c| c.name.clone()).collect();

    let mut hierarchies = Vec::with_capacity(roots.len());
    for root_entity in roots {
        let upward = super_chain(registry, root_entity)?;
        // The topmost identifiable ancestor heads the tree; the root entity
        // itself qualifies, so the search cannot come up empty.
        let absolute_root_index = upward
            .iter()
            .rposition(|c| c.is_identifiable())
            .unwrap_or(0);
        let absolute_root = upward[absolute_root_index];
        let chain: HashSet<String> = upward[..=absolute_root_index]
            .iter()
            .map(|c| c.name.clone())
            .collect();

        let default_access = resolve_default_access(&upward).ok_or_else(|| {
            CategorizeError::UndeterminedAccessType {
                class: root_entity.name.clone(),
            }
        })?;

        let mut foreign_roots = all_roots.clone();
        foreign_roots.remove(&root_entity.name);

        hierarchies.push(EntityHierarchy::build(
            registry,
            absolute_root,
            root_entity,
            chain,
            default_access,
            &foreign_roots,
        )?);
    }

    info!(
        hierarchies = hierarchies.len(),
        classes = registry.len(),
        "categorized domain model"
    );
    Ok(CategorizedModel { hierarchies })
}

fn has_entity_ancestor(
    registry: &ModelRegistry,
    class: &ClassDetails,
) -> Result<bool, CategorizeError> {
    // Seed with the class itself so a chain looping back to it is a cycle,
    // not an ancestor.
    let mut seen = HashSet::from([class.name.as_str()]);
    let mut current = class.super_class.as_deref();
    while let Some(name) = current {
        if !seen.insert(name) {
            return Err(CategorizeError::CyclicHierarchy {
                class: class.name.clone(),
            });
        }
        let super_class = registry.expect(name)?;
        if super_class.is_entity() {
            return Ok(true);
        }
        current = super_class.super_class.as_deref();
    }
    Ok(false)
}

/// The super-type chain walking upward: `[root entity, super, ..., topmost]`.
fn super_chain<'a>(
    registry: &'a ModelRegistry,
    root_entity: &'a ClassDetails,
) -> Result<Vec<&'a ClassDetails>, CategorizeError> {
    let mut chain = vec![root_entity];
    let mut seen = HashSet::new();
    let mut current = root_entity.super_class.as_deref();
    while let Some(name) = current {
        if !seen.insert(name) {
            return Err(CategorizeError::CyclicHierarchy {
                class: root_entity.name.clone(),
            });
        }
        let class = registry.expect(name)?;
        chain.push(class);
        current = class.super_class.as_deref();
    }
    Ok(chain)
}

/// Default access for a hierarchy: walking upward from the root entity, the
/// first explicit access marker wins; otherwise the placement of the first
/// identifier member decides (field wins field access, method wins property
/// access).
fn resolve_default_access(upward: &[&ClassDetails]) -> Option<AccessKind> {
    for class in upward {
        if let Some(Marker::Access { kind }) = class.marker(MarkerKind::Access) {
            return Some(*kind);
        }
        if class.fields.iter().any(MemberDetails::is_identifier) {
            return Some(AccessKind::Field);
        }
        if class.methods.iter().any(MemberDetails::is_identifier) {
            return Some(AccessKind::Property);
        }
    }
    None
}
