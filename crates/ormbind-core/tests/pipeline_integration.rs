//! Integration tests for the categorize-then-bind pipeline.

use ormbind_core::bind::{bind, BindError, BindOptions};
use ormbind_core::categorize::{categorize, AttributeNature, CategorizeError, IdentifierMapping};
use ormbind_core::schema::{BoundModel, IdentifierBinding, Shape, TableKind, Value};
use ormbind_model::{
    CacheAccess, CallbackEvent, ClassDetails, ColumnSpec, InheritanceKind, Marker, MemberDetails,
    ModelRegistry,
};
use pretty_assertions::{assert_eq, assert_ne};

/// A joined-inheritance payment hierarchy rooted under a mapped superclass,
/// exercising secondary tables, overrides, caching, and root-level policies.
fn payment_domain() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("AuditedBase")
                .with_marker(Marker::MappedSuperclass)
                .with_field(MemberDetails::field("id").with_marker(Marker::Id))
                .with_field(MemberDetails::field("createdAt").with_marker(Marker::Temporal)),
        )
        .unwrap();
    registry
        .add_class(
            ClassDetails::new("Payment")
                .extends("AuditedBase")
                .with_marker(Marker::Entity { name: None })
                .with_marker(Marker::Table {
                    name: "payments".into(),
                })
                .with_marker(Marker::Inheritance {
                    strategy: InheritanceKind::Joined,
                })
                .with_marker(Marker::Cache {
                    region: None,
                    access: Some(CacheAccess::ReadWrite),
                })
                .with_marker(Marker::NaturalIdCache { region: None })
                .with_marker(Marker::SecondaryTable {
                    name: "payment_notes".into(),
                })
                .with_marker(Marker::SoftDelete { column: None })
                .with_marker(Marker::Filter {
                    name: "active_payments".into(),
                    condition: Some("status <> 'CANCELLED'".into()),
                })
                .with_marker(Marker::LifecycleCallback {
                    event: CallbackEvent::PrePersist,
                    method: "stampCreation".into(),
                })
                .with_marker(Marker::AttributeOverride {
                    attribute: "createdAt".into(),
                    column: "created_ts".into(),
                })
                .with_field(MemberDetails::field("version").with_marker(Marker::Version))
                .with_field(
                    MemberDetails::field("amount")
                        .with_marker(Marker::Column(ColumnSpec::named("amount_minor").not_null())),
                )
                .with_field(MemberDetails::field("currency"))
                .with_field(
                    MemberDetails::field("memo").with_marker(Marker::Column(
                        ColumnSpec::named("note_text").in_table("payment_notes"),
                    )),
                )
                .with_method(MemberDetails::method("stampCreation")),
        )
        .unwrap();
    registry
        .add_class(
            ClassDetails::new("CardPayment")
                .extends("Payment")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("lastFour")),
        )
        .unwrap();
    registry
        .add_class(
            ClassDetails::new("RewardsCardPayment")
                .extends("CardPayment")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("pointsEarned")),
        )
        .unwrap();
    registry
        .add_class(
            ClassDetails::new("WirePayment")
                .extends("Payment")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("swiftCode")),
        )
        .unwrap();
    registry
}

/// A two-level hierarchy with no inheritance declaration, so the
/// single-table default applies.
fn customer_domain() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("Customer")
                .with_marker(Marker::Entity { name: None })
                .with_marker(Marker::Table {
                    name: "customers".into(),
                })
                .with_field(MemberDetails::field("id").with_marker(Marker::Id))
                .with_field(MemberDetails::field("name")),
        )
        .unwrap();
    registry
        .add_class(
            ClassDetails::new("VipCustomer")
                .extends("Customer")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("tier")),
        )
        .unwrap();
    registry
}

/// A three-level table-per-class hierarchy.
fn document_domain() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("Document")
                .with_marker(Marker::Entity { name: None })
                .with_marker(Marker::Inheritance {
                    strategy: InheritanceKind::TablePerClass,
                })
                .with_field(MemberDetails::field("id").with_marker(Marker::Id))
                .with_field(MemberDetails::field("title")),
        )
        .unwrap();
    registry
        .add_class(
            ClassDetails::new("Invoice")
                .extends("Document")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("dueDate").with_marker(Marker::Temporal)),
        )
        .unwrap();
    registry
        .add_class(
            ClassDetails::new("CreditNote")
                .extends("Invoice")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("reason")),
        )
        .unwrap();
    registry
}

fn pipeline(registry: &ModelRegistry) -> BoundModel {
    let model = categorize(registry).unwrap();
    bind(&model, &BindOptions::default()).unwrap()
}

#[test]
fn test_joined_hierarchy_shapes() {
    let bound = pipeline(&payment_domain());

    let payment = bound.type_binding("Payment").unwrap();
    assert!(payment.is_root());
    assert!(payment.super_binding.is_none());

    let audited = bound.type_binding("AuditedBase").unwrap();
    assert_eq!(audited.shape, Shape::MappedSuperclass);

    let rewards = bound.type_binding("RewardsCardPayment").unwrap();
    assert_eq!(rewards.shape, Shape::JoinedSubclass);
    let card = bound.binding(rewards.super_binding.unwrap());
    assert_eq!(card.class, "CardPayment");
    assert_eq!(card.shape, Shape::JoinedSubclass);
    let root = bound.binding(card.super_binding.unwrap());
    assert_eq!(root.class, "Payment");
}

#[test]
fn test_joined_subclasses_bind_their_own_tables() {
    let bound = pipeline(&payment_domain());

    // payments, payment_notes, and one table per joined subclass.
    assert_eq!(bound.table_count(), 5);

    let payment = bound.type_binding("Payment").unwrap();
    let card = bound.type_binding("CardPayment").unwrap();
    let wire = bound.type_binding("WirePayment").unwrap();
    assert_ne!(card.table, payment.table);
    assert_ne!(wire.table, payment.table);

    let card_table = bound.table(card.table.unwrap());
    assert_eq!(card_table.logical_name, "CardPayment");
    assert_eq!(card_table.kind, TableKind::Physical);
    assert!(card_table.column("lastFour").is_some());
    assert!(card_table.column("amount_minor").is_none());
}

#[test]
fn test_root_identifier_becomes_primary_key() {
    let bound = pipeline(&payment_domain());
    let details = bound
        .type_binding("Payment")
        .unwrap()
        .root_details()
        .unwrap();

    let property = match &details.identifier {
        IdentifierBinding::Basic { property } => property,
        other => panic!("Expected Basic identifier, got {other:?}"),
    };
    assert_eq!(property.name, "id");

    let (_, payments) = bound.table_by_name("payments").unwrap();
    let key: Vec<&str> = payments
        .primary_key_columns()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(key, vec!["id"]);
    assert!(!payments.column("id").unwrap().nullable);
}

#[test]
fn test_version_attribute_binds_not_null() {
    let bound = pipeline(&payment_domain());
    let details = bound
        .type_binding("Payment")
        .unwrap()
        .root_details()
        .unwrap();

    let version = details.version.as_ref().unwrap();
    assert_eq!(version.name, "version");

    let column_ref = version.column().unwrap();
    let column = &bound.table(column_ref.table).columns[column_ref.index];
    assert_eq!(column.name, "version");
    assert!(!column.nullable);
}

#[test]
fn test_mapped_superclass_borrows_descendant_table() {
    let bound = pipeline(&payment_domain());

    let payment = bound.type_binding("Payment").unwrap();
    let audited = bound.type_binding("AuditedBase").unwrap();
    assert_eq!(audited.table, payment.table);

    // The inherited attribute stays a property of the declaring type but
    // its column lands on the borrowed table.
    let created = audited.property("createdAt").unwrap();
    assert_eq!(created.column().unwrap().table, payment.table.unwrap());
    assert!(payment.property("createdAt").is_none());
}

#[test]
fn test_attribute_override_renames_inherited_column() {
    let bound = pipeline(&payment_domain());
    let (_, payments) = bound.table_by_name("payments").unwrap();

    assert!(payments.column("created_ts").is_some());
    assert!(payments.column("createdAt").is_none());

    let audited = bound.type_binding("AuditedBase").unwrap();
    let column_ref = audited.property("createdAt").unwrap().column().unwrap();
    assert_eq!(
        bound.table(column_ref.table).columns[column_ref.index].name,
        "created_ts"
    );
}

#[test]
fn test_secondary_table_receives_targeted_property() {
    let bound = pipeline(&payment_domain());
    let payment = bound.type_binding("Payment").unwrap();

    let (notes_id, notes) = bound.table_by_name("payment_notes").unwrap();
    match &notes.kind {
        TableKind::Secondary { owner } => assert_eq!(owner, "Payment"),
        other => panic!("Expected Secondary, got {other:?}"),
    }

    assert_eq!(payment.joins.len(), 1);
    let join = &payment.joins[0];
    assert_eq!(join.table, notes_id);
    assert_eq!(join.properties.len(), 1);
    assert_eq!(join.properties[0].name, "memo");
    assert!(notes.column("note_text").is_some());

    // The property lives on the join, not on the primary property list.
    assert!(payment.property("memo").is_none());
    assert!(payment.property_anywhere("memo").is_some());
}

#[test]
fn test_root_level_policies_bind_on_root() {
    let bound = pipeline(&payment_domain());
    let details = bound
        .type_binding("Payment")
        .unwrap()
        .root_details()
        .unwrap();

    let soft_delete = details.soft_delete.as_ref().unwrap();
    let column = &bound.table(soft_delete.column.table).columns[soft_delete.column.index];
    assert_eq!(column.name, "deleted");
    assert!(!column.nullable);

    assert_eq!(details.filters.len(), 1);
    assert_eq!(details.filters[0].name, "active_payments");
    assert_eq!(
        details.filters[0].condition.as_deref(),
        Some("status <> 'CANCELLED'")
    );

    assert_eq!(details.callbacks.len(), 1);
    assert_eq!(details.callbacks[0].event, CallbackEvent::PrePersist);
    assert_eq!(details.callbacks[0].method, "stampCreation");

    // Subclasses never carry root-level policies.
    assert!(bound
        .type_binding("CardPayment")
        .unwrap()
        .root_details()
        .is_none());
}

#[test]
fn test_cache_regions_default_to_entity_name() {
    let bound = pipeline(&payment_domain());
    let details = bound
        .type_binding("Payment")
        .unwrap()
        .root_details()
        .unwrap();

    let cache = details.cache.as_ref().unwrap();
    assert_eq!(cache.region, "Payment");
    assert_eq!(cache.access, CacheAccess::ReadWrite);
    assert_eq!(
        details.natural_id_cache_region.as_deref(),
        Some("Payment##NaturalId")
    );
}

#[test]
fn test_single_table_hierarchy_shares_one_table() {
    let bound = pipeline(&customer_domain());

    assert_eq!(bound.table_count(), 1);
    let customer = bound.type_binding("Customer").unwrap();
    let vip = bound.type_binding("VipCustomer").unwrap();
    assert_eq!(vip.shape, Shape::SingleTableSubclass);
    assert_eq!(vip.table, customer.table);

    let (_, customers) = bound.table_by_name("customers").unwrap();
    assert!(customers.column("id").is_some());
    assert!(customers.column("name").is_some());
    assert!(customers.column("tier").is_some());

    // The subclass keeps its own property even though the table is shared.
    assert!(vip.property("tier").is_some());
    assert!(customer.property("tier").is_none());
}

#[test]
fn test_table_per_class_builds_union_chain() {
    let bound = pipeline(&document_domain());

    let document = bound.type_binding("Document").unwrap();
    let invoice = bound.type_binding("Invoice").unwrap();
    let credit = bound.type_binding("CreditNote").unwrap();
    assert_eq!(invoice.shape, Shape::UnionSubclass);
    assert_eq!(credit.shape, Shape::UnionSubclass);

    match &bound.table(invoice.table.unwrap()).kind {
        TableKind::Union { included } => assert_eq!(*included, document.table.unwrap()),
        other => panic!("Expected Union, got {other:?}"),
    }
    match &bound.table(credit.table.unwrap()).kind {
        TableKind::Union { included } => assert_eq!(*included, invoice.table.unwrap()),
        other => panic!("Expected Union, got {other:?}"),
    }

    // Inherited columns are reachable through the chain, never copied.
    let credit_table = credit.table.unwrap();
    assert!(bound.table(credit_table).column("id").is_none());
    assert!(bound.table(credit_table).column("reason").is_some());
    let inherited = bound.column_in_family(credit_table, "id").unwrap();
    assert!(!inherited.nullable);
    assert!(bound.column_in_family(credit_table, "title").is_some());
}

#[test]
fn test_embeddable_typed_attribute_binds_component_shell() {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("Address")
                .with_marker(Marker::Embeddable)
                .with_field(MemberDetails::field("street"))
                .with_field(MemberDetails::field("city")),
        )
        .unwrap();
    registry
        .add_class(
            ClassDetails::new("Payment")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("id").with_marker(Marker::Id))
                .with_field(MemberDetails::field("billing").of_type("Address")),
        )
        .unwrap();

    let model = categorize(&registry).unwrap();
    let hierarchy = model.hierarchy_of("Payment").unwrap();
    let node = hierarchy.node(hierarchy.node_for("Payment").unwrap());
    assert_eq!(
        node.attribute("billing").unwrap().nature,
        AttributeNature::Embedded
    );

    let bound = bind(&model, &BindOptions::default()).unwrap();
    let payment = bound.type_binding("Payment").unwrap();
    match &payment.property("billing").unwrap().value {
        Value::Component(component) => {
            assert_eq!(component.class.as_deref(), Some("Address"));
            assert!(component.properties.is_empty());
        }
        other => panic!("Expected Component, got {other:?}"),
    }
}

#[test]
fn test_non_identifiable_intermediate_is_transparent() {
    let mut registry = payment_domain();
    registry
        .add_class(ClassDetails::new("PaymentShim").extends("Payment"))
        .unwrap();
    registry
        .add_class(
            ClassDetails::new("GiftPayment")
                .extends("PaymentShim")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("code")),
        )
        .unwrap();

    let model = categorize(&registry).unwrap();
    let hierarchy = model.hierarchy_of("GiftPayment").unwrap();
    assert!(hierarchy.contains("Payment"));
    assert!(hierarchy.node_for("PaymentShim").is_none());

    // The managed type below the shim hangs directly off Payment.
    let gift = hierarchy.node(hierarchy.node_for("GiftPayment").unwrap());
    let parent = hierarchy.node(gift.super_id.unwrap());
    assert_eq!(parent.name(), "Payment");

    let bound = bind(&model, &BindOptions::default()).unwrap();
    let gift = bound.type_binding("GiftPayment").unwrap();
    assert_eq!(gift.shape, Shape::JoinedSubclass);
    assert_eq!(bound.binding(gift.super_binding.unwrap()).class, "Payment");
}

#[test]
fn test_rootward_inheritance_declaration_wins() {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("Base")
                .with_marker(Marker::MappedSuperclass)
                .with_marker(Marker::Inheritance {
                    strategy: InheritanceKind::Joined,
                })
                .with_field(MemberDetails::field("id").with_marker(Marker::Id)),
        )
        .unwrap();
    registry
        .add_class(
            ClassDetails::new("Derived")
                .extends("Base")
                .with_marker(Marker::Entity { name: None })
                .with_marker(Marker::Inheritance {
                    strategy: InheritanceKind::SingleTable,
                })
                .with_field(MemberDetails::field("label")),
        )
        .unwrap();
    registry
        .add_class(
            ClassDetails::new("Leaf")
                .extends("Derived")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("extra")),
        )
        .unwrap();

    let model = categorize(&registry).unwrap();
    let hierarchy = model.hierarchy_of("Derived").unwrap();
    assert_eq!(hierarchy.inheritance, InheritanceKind::Joined);

    let bound = bind(&model, &BindOptions::default()).unwrap();
    assert_eq!(
        bound.type_binding("Leaf").unwrap().shape,
        Shape::JoinedSubclass
    );
}

#[test]
fn test_entity_level_facts_carry_to_binding() {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("Ledger")
                .with_marker(Marker::Entity { name: None })
                .with_marker(Marker::Immutable)
                .with_marker(Marker::BatchSize { size: 25 })
                .with_marker(Marker::Lazy { enabled: false })
                .with_marker(Marker::SqlInsert {
                    statement: "insert into ledger (id) values (?)".into(),
                })
                .with_field(MemberDetails::field("id").with_marker(Marker::Id)),
        )
        .unwrap();

    let bound = pipeline(&registry);
    let ledger = bound.type_binding("Ledger").unwrap();
    assert!(!ledger.mutable);
    assert!(!ledger.lazy);
    assert_eq!(ledger.batch_size, Some(25));

    let custom_sql = ledger.custom_sql.as_ref().unwrap();
    assert!(custom_sql.insert.is_some());
    assert!(custom_sql.update.is_none());
    assert!(custom_sql.delete.is_none());
}

#[test]
fn test_tenant_discriminator_binds_nullable_on_root() {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("Account")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("id").with_marker(Marker::Id))
                .with_field(MemberDetails::field("region").with_marker(Marker::TenantId)),
        )
        .unwrap();

    let bound = pipeline(&registry);
    let details = bound
        .type_binding("Account")
        .unwrap()
        .root_details()
        .unwrap();

    let tenant = details.tenant.as_ref().unwrap();
    assert_eq!(tenant.name, "region");
    let column_ref = tenant.column().unwrap();
    assert!(bound.table(column_ref.table).columns[column_ref.index].nullable);
}

#[test]
fn test_callback_method_must_exist() {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("Broken")
                .with_marker(Marker::Entity { name: None })
                .with_marker(Marker::LifecycleCallback {
                    event: CallbackEvent::PreRemove,
                    method: "purge".into(),
                })
                .with_field(MemberDetails::field("id").with_marker(Marker::Id)),
        )
        .unwrap();

    let model = categorize(&registry).unwrap();
    match bind(&model, &BindOptions::default()) {
        Err(BindError::CallbackMethodNotFound { class, method }) => {
            assert_eq!(class, "Broken");
            assert_eq!(method, "purge");
        }
        other => panic!("Expected CallbackMethodNotFound, got {other:?}"),
    }
}

#[test]
fn test_ambiguous_nature_is_rejected() {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("Payment")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("id").with_marker(Marker::Id))
                .with_field(
                    MemberDetails::field("owner")
                        .with_marker(Marker::Basic)
                        .with_marker(Marker::ManyToOne),
                ),
        )
        .unwrap();

    match categorize(&registry) {
        Err(CategorizeError::AmbiguousNature {
            class,
            member,
            natures,
        }) => {
            assert_eq!(class, "Payment");
            assert_eq!(member, "owner");
            assert!(natures.contains(&AttributeNature::Basic));
            assert!(natures.contains(&AttributeNature::ToOne));
        }
        other => panic!("Expected AmbiguousNature, got {other:?}"),
    }
}

#[test]
fn test_non_aggregated_identifier_fails_binding() {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("LegacyOrder")
                .with_marker(Marker::Entity { name: None })
                .with_marker(Marker::IdClass {
                    class: "LegacyOrderPk".into(),
                })
                .with_field(MemberDetails::field("orderNo").with_marker(Marker::Id))
                .with_field(MemberDetails::field("series").with_marker(Marker::Id)),
        )
        .unwrap();

    let model = categorize(&registry).unwrap();
    let hierarchy = model.hierarchy_of("LegacyOrder").unwrap();
    match &hierarchy.identifier {
        IdentifierMapping::NonAggregated {
            attributes,
            id_class,
        } => {
            assert_eq!(attributes.len(), 2);
            assert_eq!(id_class.as_deref(), Some("LegacyOrderPk"));
        }
        other => panic!("Expected NonAggregated, got {other:?}"),
    }

    match bind(&model, &BindOptions::default()) {
        Err(BindError::UnsupportedIdentifier { class }) => assert_eq!(class, "LegacyOrder"),
        other => panic!("Expected UnsupportedIdentifier, got {other:?}"),
    }
}

#[test]
fn test_relation_valued_attribute_fails_binding() {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("Payment")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("id").with_marker(Marker::Id))
                .with_field(
                    MemberDetails::field("customer")
                        .of_type("Customer")
                        .with_marker(Marker::ManyToOne),
                ),
        )
        .unwrap();

    let model = categorize(&registry).unwrap();
    match bind(&model, &BindOptions::default()) {
        Err(BindError::UnsupportedNature {
            class,
            member,
            nature,
        }) => {
            assert_eq!(class, "Payment");
            assert_eq!(member, "customer");
            assert_eq!(nature, AttributeNature::ToOne);
        }
        other => panic!("Expected UnsupportedNature, got {other:?}"),
    }
}

#[test]
fn test_unknown_secondary_table_is_rejected() {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("Payment")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("id").with_marker(Marker::Id))
                .with_field(
                    MemberDetails::field("memo")
                        .with_marker(Marker::Column(ColumnSpec::named("memo").in_table("nope"))),
                ),
        )
        .unwrap();

    let model = categorize(&registry).unwrap();
    match bind(&model, &BindOptions::default()) {
        Err(BindError::UnknownSecondaryTable {
            class,
            member,
            table,
        }) => {
            assert_eq!(class, "Payment");
            assert_eq!(member, "memo");
            assert_eq!(table, "nope");
        }
        other => panic!("Expected UnknownSecondaryTable, got {other:?}"),
    }
}

#[test]
fn test_conflicting_table_sources_fail() {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("PaymentSummary")
                .with_marker(Marker::Entity { name: None })
                .with_marker(Marker::Table {
                    name: "payment_summary".into(),
                })
                .with_marker(Marker::DerivedTable {
                    query: "select id from payments".into(),
                })
                .with_field(MemberDetails::field("id").with_marker(Marker::Id)),
        )
        .unwrap();

    let model = categorize(&registry).unwrap();
    match bind(&model, &BindOptions::default()) {
        Err(BindError::ConflictingTableSources { class }) => assert_eq!(class, "PaymentSummary"),
        other => panic!("Expected ConflictingTableSources, got {other:?}"),
    }
}

#[test]
fn test_mapped_superclass_leaf_attributes_have_no_table() {
    let mut registry = ModelRegistry::new();
    registry
        .add_class(
            ClassDetails::new("Payment")
                .with_marker(Marker::Entity { name: None })
                .with_field(MemberDetails::field("id").with_marker(Marker::Id)),
        )
        .unwrap();
    registry
        .add_class(
            ClassDetails::new("AuditTail")
                .extends("Payment")
                .with_marker(Marker::MappedSuperclass)
                .with_field(MemberDetails::field("note")),
        )
        .unwrap();

    let model = categorize(&registry).unwrap();
    match bind(&model, &BindOptions::default()) {
        Err(BindError::NoTableForMappedSuperclass { class }) => assert_eq!(class, "AuditTail"),
        other => panic!("Expected NoTableForMappedSuperclass, got {other:?}"),
    }
}

#[test]
fn test_bound_model_serializes() {
    let bound = pipeline(&payment_domain());
    let json = serde_json::to_value(&bound).unwrap();

    let tables = json["tables"].as_array().unwrap();
    assert_eq!(tables.len(), bound.table_count());
    assert!(tables
        .iter()
        .any(|t| t["logical_name"] == "payments"));

    let types = json["types"].as_array().unwrap();
    assert_eq!(types.len(), bound.type_count());
}
