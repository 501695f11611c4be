//! The persistence marker vocabulary.
//!
//! A [`Marker`] is a declarative annotation attached to a class or member:
//! a kind plus typed arguments. Scanners translate source-level annotations
//! into markers; override-document readers materialize overrides as synthetic
//! markers of the same kinds. The pipeline never distinguishes the two.

use crate::access::AccessKind;
use serde::{Deserialize, Serialize};

/// Hierarchy-wide inheritance strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InheritanceKind {
    /// One table for the whole hierarchy.
    #[default]
    SingleTable,
    /// One table per class, joined by primary key.
    Joined,
    /// One complete table per concrete class, unioned for polymorphic reads.
    TablePerClass,
}

/// How optimistic lock checks are expressed for a hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptimisticLockStyle {
    /// No optimistic locking.
    None,
    /// A dedicated version attribute.
    #[default]
    Version,
    /// Compare dirty attributes on update.
    Dirty,
    /// Compare all attributes on update.
    All,
}

/// Cache concurrency access for a cached hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheAccess {
    ReadOnly,
    #[default]
    ReadWrite,
    NonstrictReadWrite,
    Transactional,
}

/// Lifecycle events a callback method can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallbackEvent {
    PrePersist,
    PostPersist,
    PreUpdate,
    PostUpdate,
    PreRemove,
    PostRemove,
    PostLoad,
}

/// Explicit column mapping attached to a member.
///
/// All fields are optional except the nullability and uniqueness flags, which
/// default to a plain nullable, non-unique column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name; the naming strategy fills this in when absent.
    pub name: Option<String>,
    /// Target table logical name; the owner's primary table when absent.
    pub table: Option<String>,
    pub nullable: bool,
    pub unique: bool,
    /// Length for character columns.
    pub length: Option<u32>,
    /// Precision for numeric columns.
    pub precision: Option<u8>,
    /// Scale for numeric columns.
    pub scale: Option<u8>,
    /// Verbatim DDL fragment overriding the derived definition.
    pub definition: Option<String>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            name: None,
            table: None,
            nullable: true,
            unique: false,
            length: None,
            precision: None,
            scale: None,
            definition: None,
        }
    }
}

impl ColumnSpec {
    /// A column spec carrying only an explicit name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the target table logical name.
    pub fn in_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Mark the column non-nullable.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark the column unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Set the character length.
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
}

/// A declarative persistence annotation on a class or member.
///
/// The set is closed: every marker the pipeline understands is a variant
/// here, with its arguments as typed fields. Unknown source annotations are
/// the scanner's problem, not ours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Marker {
    // --- type-level ---
    /// Marks a class as an entity, optionally renaming it.
    Entity { name: Option<String> },
    /// Marks a class as a mapped superclass: inherited state, no identity of
    /// its own, no table of its own.
    MappedSuperclass,
    /// Marks a class as embeddable into owning types.
    Embeddable,
    /// Declares the hierarchy inheritance strategy.
    Inheritance { strategy: InheritanceKind },
    /// Declares the hierarchy optimistic-lock style.
    OptimisticLocking { style: OptimisticLockStyle },
    /// Enables second-level caching for the hierarchy.
    Cache {
        region: Option<String>,
        access: Option<CacheAccess>,
    },
    /// Enables natural-id caching for the hierarchy.
    NaturalIdCache { region: Option<String> },
    /// Names the composite identifier class for a non-aggregated id.
    IdClass { class: String },
    /// Overrides the resolved access kind for this class.
    Access { kind: AccessKind },
    /// Explicit primary table name.
    Table { name: String },
    /// Maps the class to a derived table (an inline view) instead of a
    /// physical table.
    DerivedTable { query: String },
    /// Declares an additional table joined to the primary one.
    SecondaryTable { name: String },
    /// Soft-delete indicator column on the root table.
    SoftDelete { column: Option<String> },
    /// Named restriction applied when the filter is enabled.
    Filter {
        name: String,
        condition: Option<String>,
    },
    /// Binds a lifecycle event to a method on the class.
    LifecycleCallback {
        event: CallbackEvent,
        method: String,
    },
    /// Replaces the column mapping of an inherited attribute.
    AttributeOverride { attribute: String, column: String },
    /// Replaces the join column of an inherited association.
    AssociationOverride { attribute: String, column: String },
    /// Registers a converter at class level, optionally scoped to one
    /// attribute path.
    Conversion {
        attribute: Option<String>,
        converter: String,
        disabled: bool,
    },
    /// Fetch batch size hint.
    BatchSize { size: u16 },
    /// Entities of this class are never updated.
    Immutable,
    /// Opt this class in or out of the shared cache.
    Cacheable { enabled: bool },
    /// Lazy proxying hint.
    Lazy { enabled: bool },
    /// Custom SQL overriding the generated insert.
    SqlInsert { statement: String },
    /// Custom SQL overriding the generated update.
    SqlUpdate { statement: String },
    /// Custom SQL overriding the generated delete.
    SqlDelete { statement: String },

    // --- member-level: identity and special attributes ---
    /// Simple identifier member.
    Id,
    /// Aggregated (embedded composite) identifier member.
    EmbeddedId,
    /// Optimistic-lock version member.
    Version,
    /// Tenant discriminator member.
    TenantId,
    /// Excluded from persistence entirely.
    Transient,

    // --- member-level: explicit natures ---
    Basic,
    Embedded,
    Any,
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
    ElementCollection,
    ManyToAny,

    // --- member-level: markers implying a nature ---
    /// Temporal precision for a date/time member (implies basic).
    Temporal,
    /// Large-object storage (implies basic).
    Lob,
    /// Enum member stored by name or ordinal (implies basic).
    Enumerated,
    /// Attribute converter applied to this member (implies basic).
    Convert {
        converter: Option<String>,
        disabled: bool,
    },
    /// Value generated by the database (implies basic).
    Generated,
    /// Nationalized character data (implies basic).
    Nationalized,
    /// Custom low-level type implementation (implies basic).
    UserType { implementation: String },
    /// Custom instantiator for an embeddable value (implies embedded).
    EmbeddableInstantiator { implementation: String },
    /// Custom composite type implementation (implies embedded).
    CompositeUserType { implementation: String },
    /// Discriminator configuration for a polymorphic any-value (implies any).
    AnyDiscriminator,
    /// One discriminator-value-to-class mapping (implies any).
    AnyDiscriminatorValue { value: String, class: String },

    /// Explicit column mapping for a member.
    Column(ColumnSpec),
}

/// Discriminant of a [`Marker`], for presence tests and lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Entity,
    MappedSuperclass,
    Embeddable,
    Inheritance,
    OptimisticLocking,
    Cache,
    NaturalIdCache,
    IdClass,
    Access,
    Table,
    DerivedTable,
    SecondaryTable,
    SoftDelete,
    Filter,
    LifecycleCallback,
    AttributeOverride,
    AssociationOverride,
    Conversion,
    BatchSize,
    Immutable,
    Cacheable,
    Lazy,
    SqlInsert,
    SqlUpdate,
    SqlDelete,
    Id,
    EmbeddedId,
    Version,
    TenantId,
    Transient,
    Basic,
    Embedded,
    Any,
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
    ElementCollection,
    ManyToAny,
    Temporal,
    Lob,
    Enumerated,
    Convert,
    Generated,
    Nationalized,
    UserType,
    EmbeddableInstantiator,
    CompositeUserType,
    AnyDiscriminator,
    AnyDiscriminatorValue,
    Column,
}

impl Marker {
    /// The discriminant of this marker.
    pub fn kind(&self) -> MarkerKind {
        match self {
            Marker::Entity { .. } => MarkerKind::Entity,
            Marker::MappedSuperclass => MarkerKind::MappedSuperclass,
            Marker::Embeddable => MarkerKind::Embeddable,
            Marker::Inheritance { .. } => MarkerKind::Inheritance,
            Marker::OptimisticLocking { .. } => MarkerKind::OptimisticLocking,
            Marker::Cache { .. } => MarkerKind::Cache,
            Marker::NaturalIdCache { .. } => MarkerKind::NaturalIdCache,
            Marker::IdClass { .. } => MarkerKind::IdClass,
            Marker::Access { .. } => MarkerKind::Access,
            Marker::Table { .. } => MarkerKind::Table,
            Marker::DerivedTable { .. } => MarkerKind::DerivedTable,
            Marker::SecondaryTable { .. } => MarkerKind::SecondaryTable,
            Marker::SoftDelete { .. } => MarkerKind::SoftDelete,
            Marker::Filter { .. } => MarkerKind::Filter,
            Marker::LifecycleCallback { .. } => MarkerKind::LifecycleCallback,
            Marker::AttributeOverride { .. } => MarkerKind::AttributeOverride,
            Marker::AssociationOverride { .. } => MarkerKind::AssociationOverride,
            Marker::Conversion { .. } => MarkerKind::Conversion,
            Marker::BatchSize { .. } => MarkerKind::BatchSize,
            Marker::Immutable => MarkerKind::Immutable,
            Marker::Cacheable { .. } => MarkerKind::Cacheable,
            Marker::Lazy { .. } => MarkerKind::Lazy,
            Marker::SqlInsert { .. } => MarkerKind::SqlInsert,
            Marker::SqlUpdate { .. } => MarkerKind::SqlUpdate,
            Marker::SqlDelete { .. } => MarkerKind::SqlDelete,
            Marker::Id => MarkerKind::Id,
            Marker::EmbeddedId => MarkerKind::EmbeddedId,
            Marker::Version => MarkerKind::Version,
            Marker::TenantId => MarkerKind::TenantId,
            Marker::Transient => MarkerKind::Transient,
            Marker::Basic => MarkerKind::Basic,
            Marker::Embedded => MarkerKind::Embedded,
            Marker::Any => MarkerKind::Any,
            Marker::OneToOne => MarkerKind::OneToOne,
            Marker::ManyToOne => MarkerKind::ManyToOne,
            Marker::OneToMany => MarkerKind::OneToMany,
            Marker::ManyToMany => MarkerKind::ManyToMany,
            Marker::ElementCollection => MarkerKind::ElementCollection,
            Marker::ManyToAny => MarkerKind::ManyToAny,
            Marker::Temporal => MarkerKind::Temporal,
            Marker::Lob => MarkerKind::Lob,
            Marker::Enumerated => MarkerKind::Enumerated,
            Marker::Convert { .. } => MarkerKind::Convert,
            Marker::Generated => MarkerKind::Generated,
            Marker::Nationalized => MarkerKind::Nationalized,
            Marker::UserType { .. } => MarkerKind::UserType,
            Marker::EmbeddableInstantiator { .. } => MarkerKind::EmbeddableInstantiator,
            Marker::CompositeUserType { .. } => MarkerKind::CompositeUserType,
            Marker::AnyDiscriminator => MarkerKind::AnyDiscriminator,
            Marker::AnyDiscriminatorValue { .. } => MarkerKind::AnyDiscriminatorValue,
            Marker::Column(_) => MarkerKind::Column,
        }
    }

    /// Whether this marker may appear more than once on the same target.
    pub fn is_repeatable(&self) -> bool {
        matches!(
            self.kind(),
            MarkerKind::SecondaryTable
                | MarkerKind::Filter
                | MarkerKind::LifecycleCallback
                | MarkerKind::AttributeOverride
                | MarkerKind::AssociationOverride
                | MarkerKind::Conversion
                | MarkerKind::AnyDiscriminatorValue
        )
    }
}
