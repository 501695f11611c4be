//! The hierarchy node arena.
//!
//! Managed types form a tree per hierarchy. Nodes live in a flat arena and
//! point at each other by [`NodeId`], so parent and child links never form
//! ownership cycles.

use super::attribute::AttributeMetadata;
use ormbind_model::{AccessKind, ClassDetails, Marker, MarkerKind};
use serde::Serialize;

/// Index of a node within its hierarchy's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub(crate) usize);

/// Whether a type heads its hierarchy tree or extends another managed type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HierarchyRelation {
    /// No managed super-type.
    Root,
    /// Extends a managed super-type.
    Sub,
}

/// Entity-only facts read off class markers at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityFacts {
    /// Logical entity name (explicit marker argument or class name).
    pub entity_name: String,
    /// False when the class is marked immutable.
    pub mutable: bool,
    /// Explicit shared-cache opt-in or opt-out, when declared.
    pub cacheable: Option<bool>,
    /// Lazy proxying hint; on unless disabled.
    pub lazy: bool,
    pub batch_size: Option<u16>,
    pub sql_insert: Option<String>,
    pub sql_update: Option<String>,
    pub sql_delete: Option<String>,
}

impl EntityFacts {
    pub(crate) fn from_class(class: &ClassDetails) -> Self {
        let mut facts = Self {
            entity_name: class.entity_name().to_string(),
            mutable: !class.has(MarkerKind::Immutable),
            cacheable: None,
            lazy: true,
            batch_size: None,
            sql_insert: None,
            sql_update: None,
            sql_delete: None,
        };
        for marker in &class.markers {
            match marker {
                Marker::Cacheable { enabled } => facts.cacheable = Some(*enabled),
                Marker::Lazy { enabled } => facts.lazy = *enabled,
                Marker::BatchSize { size } => facts.batch_size = Some(*size),
                Marker::SqlInsert { statement } => facts.sql_insert = Some(statement.clone()),
                Marker::SqlUpdate { statement } => facts.sql_update = Some(statement.clone()),
                Marker::SqlDelete { statement } => facts.sql_delete = Some(statement.clone()),
                _ => {}
            }
        }
        facts
    }
}

/// Entity vs. mapped superclass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeKind {
    Entity(EntityFacts),
    MappedSuperclass,
}

/// One managed type in a hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeNode {
    /// The source class, cloned at construction so the categorized model is
    /// self-contained.
    pub class: ClassDetails,
    pub kind: TypeKind,
    pub relation: HierarchyRelation,
    /// Resolved access for this type.
    pub access: AccessKind,
    /// Attributes resolved from the backing members, in declaration order.
    pub attributes: Vec<AttributeMetadata>,
    pub super_id: Option<NodeId>,
    /// Direct managed sub-types, in discovery order.
    pub sub_ids: Vec<NodeId>,
}

impl TypeNode {
    /// The class name.
    pub fn name(&self) -> &str {
        &self.class.name
    }

    pub fn is_entity(&self) -> bool {
        matches!(self.kind, TypeKind::Entity(_))
    }

    pub fn entity_facts(&self) -> Option<&EntityFacts> {
        match &self.kind {
            TypeKind::Entity(facts) => Some(facts),
            TypeKind::MappedSuperclass => None,
        }
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeMetadata> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Arena of nodes for one hierarchy. Ids are handed out in construction
/// order, which is always supers before subs; downstream passes rely on
/// iterating in that order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TypeArena {
    nodes: Vec<TypeNode>,
}

impl TypeArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, node: TypeNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &TypeNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TypeNode {
        &mut self.nodes[id.0]
    }

    /// All nodes with their ids, in construction order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &TypeNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Find a node by class name.
    pub fn find(&self, class: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name() == class).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
