//! Fields and methods carrying markers.

use crate::marker::{Marker, MarkerKind};
use serde::{Deserialize, Serialize};

/// Whether a member is a field or an accessor method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Field,
    Method,
}

/// One field or method of a [`ClassDetails`].
///
/// For methods the scanner supplies the attribute name (`name`), not the raw
/// accessor name, so downstream passes treat both kinds uniformly.
///
/// [`ClassDetails`]: crate::class::ClassDetails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDetails {
    /// Attribute name this member backs.
    pub name: String,
    pub kind: MemberKind,
    /// Declared type of the member, when the scanner knows it.
    pub type_name: Option<String>,
    pub markers: Vec<Marker>,
}

impl MemberDetails {
    /// A field member with no markers.
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            type_name: None,
            markers: Vec::new(),
        }
    }

    /// A method member with no markers.
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            type_name: None,
            markers: Vec::new(),
        }
    }

    /// Set the declared type name.
    pub fn of_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Attach a marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// First marker of the given kind, if any.
    pub fn marker(&self, kind: MarkerKind) -> Option<&Marker> {
        self.markers.iter().find(|m| m.kind() == kind)
    }

    /// All markers of the given kind, in declaration order.
    pub fn markers_of(&self, kind: MarkerKind) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.kind() == kind)
    }

    /// Whether a marker of the given kind is present.
    pub fn has(&self, kind: MarkerKind) -> bool {
        self.marker(kind).is_some()
    }

    /// Whether this member carries any identifier marker.
    pub fn is_identifier(&self) -> bool {
        self.has(MarkerKind::Id) || self.has(MarkerKind::EmbeddedId)
    }
}
