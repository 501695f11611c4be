//! Class descriptors and super-type links.

use crate::marker::{Marker, MarkerKind};
use crate::member::{MemberDetails, MemberKind};
use serde::{Deserialize, Serialize};

/// One class of the source model.
///
/// Super-type links are by name; the [`ModelRegistry`] resolves them. A class
/// with no entity or mapped-superclass marker can still sit inside a
/// hierarchy chain, it just contributes no persistent state.
///
/// [`ModelRegistry`]: crate::registry::ModelRegistry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDetails {
    pub name: String,
    pub super_class: Option<String>,
    pub markers: Vec<Marker>,
    pub fields: Vec<MemberDetails>,
    pub methods: Vec<MemberDetails>,
}

impl ClassDetails {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_class: None,
            markers: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Set the super-type by name.
    pub fn extends(mut self, super_class: impl Into<String>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    /// Attach a class-level marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Add a field member.
    pub fn with_field(mut self, field: MemberDetails) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a method member.
    pub fn with_method(mut self, method: MemberDetails) -> Self {
        self.methods.push(method);
        self
    }

    /// First class-level marker of the given kind, if any.
    pub fn marker(&self, kind: MarkerKind) -> Option<&Marker> {
        self.markers.iter().find(|m| m.kind() == kind)
    }

    /// All class-level markers of the given kind, in declaration order.
    pub fn markers_of(&self, kind: MarkerKind) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.kind() == kind)
    }

    /// Whether a class-level marker of the given kind is present.
    pub fn has(&self, kind: MarkerKind) -> bool {
        self.marker(kind).is_some()
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&MemberDetails> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<&MemberDetails> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Members of the given kind, in declaration order.
    pub fn members(&self, kind: MemberKind) -> &[MemberDetails] {
        match kind {
            MemberKind::Field => &self.fields,
            MemberKind::Method => &self.methods,
        }
    }

    pub fn is_entity(&self) -> bool {
        self.has(MarkerKind::Entity)
    }

    pub fn is_mapped_superclass(&self) -> bool {
        self.has(MarkerKind::MappedSuperclass)
    }

    pub fn is_embeddable(&self) -> bool {
        self.has(MarkerKind::Embeddable)
    }

    /// Whether this class contributes managed state to a hierarchy.
    pub fn is_identifiable(&self) -> bool {
        self.is_entity() || self.is_mapped_superclass()
    }

    /// The entity name: the explicit marker argument, or the class name.
    pub fn entity_name(&self) -> &str {
        match self.marker(MarkerKind::Entity) {
            Some(Marker::Entity { name: Some(name) }) => name,
            _ => &self.name,
        }
    }
}
