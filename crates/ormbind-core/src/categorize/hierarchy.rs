//! Entity hierarchies.

use super::attribute::AttributeMetadata;
use super::collector::HierarchyCollector;
use super::error::CategorizeError;
use super::node::{NodeId, TypeArena, TypeNode};
use super::walker::HierarchyWalker;
use ormbind_model::{
    AccessKind, CacheAccess, ClassDetails, InheritanceKind, ModelRegistry, OptimisticLockStyle,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Identifier mapping shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IdentifierMapping {
    /// One basic-natured identifier attribute.
    Basic { attribute: AttributeMetadata },
    /// One embedded composite identifier attribute.
    Aggregated { attribute: AttributeMetadata },
    /// Two or more identifier attributes, optionally tied to an id-class.
    NonAggregated {
        attributes: Vec<AttributeMetadata>,
        id_class: Option<String>,
    },
}

/// Second-level cache policy for a hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachePolicy {
    pub region: String,
    pub access: CacheAccess,
}

/// One converter registration aggregated from class markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionInfo {
    /// Attribute path the converter is scoped to; applies by type when absent.
    pub attribute: Option<String>,
    pub converter: String,
    pub disabled: bool,
    pub declared_by: String,
}

/// One entity hierarchy: its node tree plus hierarchy-wide facts.
///
/// Immutable once built. Inheritance strategy, identifier mapping, locking
/// style, and cache regions are resolved at the root and never recomputed
/// per sub-type.
#[derive(Debug, Serialize)]
pub struct EntityHierarchy {
    arena: TypeArena,
    root: NodeId,
    root_entity: NodeId,
    pub inheritance: InheritanceKind,
    pub identifier: IdentifierMapping,
    pub optimistic_locking: OptimisticLockStyle,
    pub version: Option<AttributeMetadata>,
    pub tenant: Option<AttributeMetadata>,
    pub cache: Option<CachePolicy>,
    pub natural_id_cache_region: Option<String>,
    /// Attribute name to replacement column name; most derived wins.
    pub attribute_overrides: BTreeMap<String, String>,
    pub association_overrides: BTreeMap<String, String>,
    pub conversions: Vec<ConversionInfo>,
}

impl EntityHierarchy {
    /// Build one hierarchy: walk the tree from its absolute root with the
    /// fact collector attached, then finalize the aggregated facts.
    pub(crate) fn build(
        registry: &ModelRegistry,
        absolute_root: &ClassDetails,
        root_entity: &ClassDetails,
        chain: HashSet<String>,
        default_access: AccessKind,
        foreign_roots: &HashSet<String>,
    ) -> Result<Self, CategorizeError> {
        let mut collector = HierarchyCollector::new(chain);
        let outcome = HierarchyWalker::walk(
            registry,
            absolute_root,
            &root_entity.name,
            default_access,
            foreign_roots,
            &mut collector,
        )?;
        let root_entity_id =
            outcome
                .root_entity
                .ok_or_else(|| CategorizeError::UnreachableRootEntity {
                    class: root_entity.name.clone(),
                    root: absolute_root.name.clone(),
                })?;

        let mut facts = collector.into_facts();
        let region_default = root_entity.entity_name();
        let inheritance = facts.inheritance();
        let optimistic_locking = facts.locking();
        let cache = facts.cache_policy(region_default);
        let natural_id_cache_region = facts.natural_id_region(region_default);
        let identifier = facts.take_identifier(&root_entity.name)?;

        Ok(Self {
            arena: outcome.arena,
            root: outcome.root,
            root_entity: root_entity_id,
            inheritance,
            identifier,
            optimistic_locking,
            version: facts.version,
            tenant: facts.tenant,
            cache,
            natural_id_cache_region,
            attribute_overrides: outcome.aggregates.attribute_overrides,
            association_overrides: outcome.aggregates.association_overrides,
            conversions: outcome.aggregates.conversions,
        })
    }

    /// The absolute root of the tree (may be a mapped superclass).
    pub fn root(&self) -> &TypeNode {
        self.arena.node(self.root)
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The root entity: the topmost entity of the hierarchy.
    pub fn root_entity(&self) -> &TypeNode {
        self.arena.node(self.root_entity)
    }

    pub fn root_entity_id(&self) -> NodeId {
        self.root_entity
    }

    pub fn node(&self, id: NodeId) -> &TypeNode {
        self.arena.node(id)
    }

    /// All nodes, in construction order (supers before subs).
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &TypeNode)> {
        self.arena.nodes()
    }

    pub fn node_for(&self, class: &str) -> Option<NodeId> {
        self.arena.find(class)
    }

    pub fn contains(&self, class: &str) -> bool {
        self.arena.find(class).is_some()
    }

    /// Whether a member is bound by the root pass (identifier, version, or
    /// tenant discriminator) rather than as a regular attribute.
    pub fn is_special_member(&self, class: &str, member: &str) -> bool {
        let matches = |a: &AttributeMetadata| a.declared_by == class && a.name == member;
        let id_match = match &self.identifier {
            IdentifierMapping::Basic { attribute } | IdentifierMapping::Aggregated { attribute } => {
                matches(attribute)
            }
            IdentifierMapping::NonAggregated { attributes, .. } => {
                attributes.iter().any(|a| matches(a))
            }
        };
        id_match
            || self.version.as_ref().is_some_and(|a| matches(a))
            || self.tenant.as_ref().is_some_and(|a| matches(a))
    }

    /// The enabled converter scoped to an attribute path, if any.
    pub fn conversion_for(&self, attribute: &str) -> Option<&ConversionInfo> {
        self.conversions
            .iter()
            .find(|c| !c.disabled && c.attribute.as_deref() == Some(attribute))
    }
}
