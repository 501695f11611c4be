//! Per-type bindings.

use super::column::ColumnRef;
use super::table::TableId;
use super::value::Property;
use crate::categorize::CachePolicy;
use ormbind_model::CallbackEvent;
use serde::Serialize;

/// Index of a type binding within the bound model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BindingId(pub(crate) usize);

/// Identifier binding of a root entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IdentifierBinding {
    /// One scalar key property.
    Basic { property: Property },
    /// One composite key property.
    Aggregated { property: Property },
}

/// Soft-delete indicator column on the root table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoftDeleteBinding {
    pub column: ColumnRef,
}

/// One named SQL restriction registered on the root entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterBinding {
    pub name: String,
    pub condition: Option<String>,
}

/// One lifecycle callback registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallbackBinding {
    pub event: CallbackEvent,
    pub method: String,
}

/// Hand-written statements replacing the generated ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomSql {
    pub insert: Option<String>,
    pub update: Option<String>,
    pub delete: Option<String>,
}

/// Facts bound only at the root entity of a hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootDetails {
    pub identifier: IdentifierBinding,
    pub version: Option<Property>,
    pub tenant: Option<Property>,
    pub cache: Option<CachePolicy>,
    pub natural_id_cache_region: Option<String>,
    pub soft_delete: Option<SoftDeleteBinding>,
    pub filters: Vec<FilterBinding>,
    pub callbacks: Vec<CallbackBinding>,
}

/// The relational shape of one bound type. A non-root entity's variant
/// follows its hierarchy's inheritance strategy, never per-entity markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    /// The root entity of a hierarchy.
    Root(RootDetails),
    /// A subclass with its own joined table.
    JoinedSubclass,
    /// A subclass stored in the root's table.
    SingleTableSubclass,
    /// A subclass with a denormalized table of its own.
    UnionSubclass,
    /// An abstract contributor of attributes, never persisted itself.
    MappedSuperclass,
}

/// A secondary table attached to an entity, with the properties stored
/// there rather than on the primary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondaryTableJoin {
    pub table: TableId,
    pub properties: Vec<Property>,
}

/// One bound managed type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeBinding {
    /// The source class this binding was built from.
    pub class: String,
    pub shape: Shape,
    /// Primary table. Single-table subclasses share the root's id here;
    /// mapped superclasses borrow their nearest entity descendant's table,
    /// or stay unset when no such descendant exists.
    pub table: Option<TableId>,
    /// Properties stored on the primary table, in binding order.
    pub properties: Vec<Property>,
    pub joins: Vec<SecondaryTableJoin>,
    /// Nearest entity ancestor's binding, through any intervening mapped
    /// superclasses.
    pub super_binding: Option<BindingId>,
    pub batch_size: Option<u16>,
    pub mutable: bool,
    pub lazy: bool,
    pub custom_sql: Option<CustomSql>,
}

impl TypeBinding {
    /// Look up a property bound to the primary table.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Look up a property across the primary table and all joins.
    pub fn property_anywhere(&self, name: &str) -> Option<&Property> {
        self.property(name).or_else(|| {
            self.joins
                .iter()
                .flat_map(|j| j.properties.iter())
                .find(|p| p.name == name)
        })
    }

    pub fn is_root(&self) -> bool {
        matches!(self.shape, Shape::Root(_))
    }

    /// Root-only details, when this binding heads its hierarchy.
    pub fn root_details(&self) -> Option<&RootDetails> {
        match &self.shape {
            Shape::Root(details) => Some(details),
            _ => None,
        }
    }
}
