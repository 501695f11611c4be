//! The managed-type walker.
//!
//! Builds the node tree for one hierarchy: depth-first, supers always before
//! subs, notifying a consumer as each node is constructed. Sub-type discovery
//! recurses through non-managed intermediate classes and stops at the roots
//! of other hierarchies.

use super::attribute::AttributeMetadata;
use super::error::CategorizeError;
use super::hierarchy::ConversionInfo;
use super::node::{EntityFacts, HierarchyRelation, NodeId, TypeArena, TypeKind, TypeNode};
use ormbind_model::{AccessKind, ClassDetails, Marker, MarkerKind, MemberKind, ModelRegistry};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Receives each managed type right after its node is constructed and before
/// its sub-types are discovered.
pub(crate) trait TypeConsumer {
    fn accept(&mut self, id: NodeId, node: &TypeNode) -> Result<(), CategorizeError>;
}

/// Override and conversion declarations aggregated over a completed tree.
/// Insertion follows construction order, so for one attribute the most
/// derived declaration wins.
#[derive(Debug, Default)]
pub(crate) struct OverrideAggregates {
    pub(crate) attribute_overrides: BTreeMap<String, String>,
    pub(crate) association_overrides: BTreeMap<String, String>,
    pub(crate) conversions: Vec<ConversionInfo>,
}

/// Outcome of one hierarchy walk.
pub(crate) struct WalkOutcome {
    pub(crate) arena: TypeArena,
    pub(crate) root: NodeId,
    pub(crate) root_entity: Option<NodeId>,
    pub(crate) aggregates: OverrideAggregates,
}

pub(crate) struct HierarchyWalker<'a> {
    registry: &'a ModelRegistry,
    default_access: AccessKind,
    root_entity_name: &'a str,
    /// Root entities of other hierarchies; discovery must not cross into them.
    foreign_roots: &'a HashSet<String>,
    arena: TypeArena,
    root_entity: Option<NodeId>,
    aggregates: OverrideAggregates,
}

impl<'a> HierarchyWalker<'a> {
    /// Walk one hierarchy from its absolute root.
    pub(crate) fn walk(
        registry: &'a ModelRegistry,
        absolute_root: &ClassDetails,
        root_entity_name: &'a str,
        default_access: AccessKind,
        foreign_roots: &'a HashSet<String>,
        consumer: &mut dyn TypeConsumer,
    ) -> Result<WalkOutcome, CategorizeError> {
        let mut walker = Self {
            registry,
            default_access,
            root_entity_name,
            foreign_roots,
            arena: TypeArena::new(),
            root_entity: None,
            aggregates: OverrideAggregates::default(),
        };
        let root = walker.instantiate(absolute_root, None, consumer)?;
        Ok(WalkOutcome {
            arena: walker.arena,
            root,
            root_entity: walker.root_entity,
            aggregates: walker.aggregates,
        })
    }

    fn instantiate(
        &mut self,
        class: &ClassDetails,
        super_id: Option<NodeId>,
        consumer: &mut dyn TypeConsumer,
    ) -> Result<NodeId, CategorizeError> {
        let access = self.resolve_access(class, super_id);
        let attributes = self.resolve_attributes(class, access)?;
        let kind = if class.is_entity() {
            TypeKind::Entity(EntityFacts::from_class(class))
        } else {
            TypeKind::MappedSuperclass
        };
        let relation = if super_id.is_some() {
            HierarchyRelation::Sub
        } else {
            HierarchyRelation::Root
        };
        debug!(
            class = %class.name,
            access = ?access,
            attributes = attributes.len(),
            "instantiated managed type"
        );

        let id = self.arena.push(TypeNode {
            class: class.clone(),
            kind,
            relation,
            access,
            attributes,
            super_id,
            sub_ids: Vec::new(),
        });
        if let Some(parent) = super_id {
            self.arena.node_mut(parent).sub_ids.push(id);
        }
        if class.name == self.root_entity_name {
            self.root_entity = Some(id);
        }

        self.post_instantiate(id, class, consumer)?;
        Ok(id)
    }

    fn post_instantiate(
        &mut self,
        id: NodeId,
        class: &ClassDetails,
        consumer: &mut dyn TypeConsumer,
    ) -> Result<(), CategorizeError> {
        consumer.accept(id, self.arena.node(id))?;
        self.instantiate_subtypes(class, id, consumer)?;
        // The root sees the whole tree only after every sub-type landed.
        if self.arena.node(id).super_id.is_none() {
            self.collect_overrides();
        }
        Ok(())
    }

    fn instantiate_subtypes(
        &mut self,
        of: &ClassDetails,
        parent: NodeId,
        consumer: &mut dyn TypeConsumer,
    ) -> Result<(), CategorizeError> {
        let registry = self.registry;
        for sub in registry.direct_subtypes(&of.name) {
            if self.foreign_roots.contains(&sub.name) {
                debug!(class = %sub.name, "skipping root of another hierarchy");
                continue;
            }
            if sub.is_identifiable() {
                self.instantiate(sub, Some(parent), consumer)?;
            } else {
                // Transparent intermediate: contributes no managed state, but
                // managed types below it still belong to this tree.
                self.instantiate_subtypes(sub, parent, consumer)?;
            }
        }
        Ok(())
    }

    fn resolve_access(&self, class: &ClassDetails, super_id: Option<NodeId>) -> AccessKind {
        if let Some(Marker::Access { kind }) = class.marker(MarkerKind::Access) {
            return *kind;
        }
        match super_id {
            Some(parent) => self.arena.node(parent).access,
            None => self.default_access,
        }
    }

    fn resolve_attributes(
        &self,
        class: &ClassDetails,
        access: AccessKind,
    ) -> Result<Vec<AttributeMetadata>, CategorizeError> {
        let backing = match access {
            AccessKind::Field => MemberKind::Field,
            AccessKind::Property => MemberKind::Method,
        };
        class
            .members(backing)
            .iter()
            .filter(|m| !m.has(MarkerKind::Transient))
            .map(|m| AttributeMetadata::resolve(self.registry, class, m))
            .collect()
    }

    fn collect_overrides(&mut self) {
        for (_, node) in self.arena.nodes() {
            for marker in &node.class.markers {
                match marker {
                    Marker::AttributeOverride { attribute, column } => {
                        self.aggregates
                            .attribute_overrides
                            .insert(attribute.clone(), column.clone());
                    }
                    Marker::AssociationOverride { attribute, column } => {
                        self.aggregates
                            .association_overrides
                            .insert(attribute.clone(), column.clone());
                    }
                    Marker::Conversion {
                        attribute,
                        converter,
                        disabled,
                    } => {
                        self.aggregates.conversions.push(ConversionInfo {
                            attribute: attribute.clone(),
                            converter: converter.clone(),
                            disabled: *disabled,
                            declared_by: node.name().to_string(),
                        });
                    }
                    _ => {}
                }
            }
        }
    }
}
