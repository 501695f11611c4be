//! Hierarchy-scoped fact collection.
//!
//! A [`TypeConsumer`] applied once per managed type, restricted to the chain
//! from the absolute root down through the root entity. The chain is visited
//! root-ward first, so "first write wins" keeps the most root-ward
//! declaration; anything redeclared further down warns and loses.

use super::attribute::AttributeMetadata;
use super::error::CategorizeError;
use super::hierarchy::{CachePolicy, IdentifierMapping};
use super::nature::AttributeNature;
use super::node::{NodeId, TypeNode};
use super::walker::TypeConsumer;
use ormbind_model::{CacheAccess, InheritanceKind, Marker, MarkerKind, OptimisticLockStyle};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// A fact and the class that declared it.
#[derive(Debug)]
struct Declared<T> {
    value: T,
    by: String,
}

fn first_wins<T: fmt::Debug>(slot: &mut Option<Declared<T>>, value: T, by: &str, what: &str) {
    match slot {
        Some(kept) => warn!(
            kept = ?kept.value,
            kept_by = %kept.by,
            ignored = ?value,
            ignored_by = %by,
            "conflicting {} declaration ignored",
            what
        ),
        None => {
            *slot = Some(Declared {
                value,
                by: by.to_string(),
            })
        }
    }
}

#[derive(Debug, Clone)]
struct CacheSpec {
    region: Option<String>,
    access: Option<CacheAccess>,
}

/// Identifier members seen so far. A second member switches the
/// representation from single value to list.
#[derive(Debug, Default)]
pub(crate) enum IdCollection {
    #[default]
    None,
    Single(AttributeMetadata),
    Multiple(Vec<AttributeMetadata>),
}

impl IdCollection {
    fn add(&mut self, attribute: AttributeMetadata) {
        *self = match std::mem::take(self) {
            IdCollection::None => IdCollection::Single(attribute),
            IdCollection::Single(first) => IdCollection::Multiple(vec![first, attribute]),
            IdCollection::Multiple(mut all) => {
                all.push(attribute);
                IdCollection::Multiple(all)
            }
        };
    }
}

/// Raw hierarchy-scoped facts, finalized once the walk completes.
#[derive(Debug, Default)]
pub(crate) struct HierarchyFacts {
    inheritance: Option<Declared<InheritanceKind>>,
    locking: Option<Declared<OptimisticLockStyle>>,
    cache: Option<Declared<CacheSpec>>,
    natural_id_cache: Option<Declared<Option<String>>>,
    id_class: Option<Declared<String>>,
    identifiers: IdCollection,
    pub(crate) version: Option<AttributeMetadata>,
    pub(crate) tenant: Option<AttributeMetadata>,
}

impl HierarchyFacts {
    pub(crate) fn inheritance(&self) -> InheritanceKind {
        self.inheritance.as_ref().map(|d| d.value).unwrap_or_default()
    }

    pub(crate) fn locking(&self) -> OptimisticLockStyle {
        self.locking.as_ref().map(|d| d.value).unwrap_or_default()
    }

    pub(crate) fn cache_policy(&self, default_region: &str) -> Option<CachePolicy> {
        self.cache.as_ref().map(|d| CachePolicy {
            region: d
                .value
                .region
                .clone()
                .unwrap_or_else(|| default_region.to_string()),
            access: d.value.access.unwrap_or_default(),
        })
    }

    pub(crate) fn natural_id_region(&self, default_region: &str) -> Option<String> {
        self.natural_id_cache.as_ref().map(|d| {
            d.value
                .clone()
                .unwrap_or_else(|| format!("{default_region}##NaturalId"))
        })
    }

    /// Resolve the identifier shape, consuming the collected members.
    pub(crate) fn take_identifier(
        &mut self,
        root_entity: &str,
    ) -> Result<IdentifierMapping, CategorizeError> {
        let id_class = self.id_class.take().map(|d| d.value);
        match std::mem::take(&mut self.identifiers) {
            IdCollection::None => Err(CategorizeError::MissingIdentifier {
                class: root_entity.to_string(),
            }),
            IdCollection::Single(attribute) => match attribute.nature {
                AttributeNature::Basic => Ok(IdentifierMapping::Basic { attribute }),
                AttributeNature::Embedded => Ok(IdentifierMapping::Aggregated { attribute }),
                nature => Err(CategorizeError::UnexpectedIdentifierNature {
                    class: attribute.declared_by,
                    member: attribute.name,
                    nature,
                }),
            },
            IdCollection::Multiple(attributes) => Ok(IdentifierMapping::NonAggregated {
                attributes,
                id_class,
            }),
        }
    }
}

/// Collects hierarchy-scoped facts along the root chain.
pub(crate) struct HierarchyCollector {
    /// Names of the classes on the absolute-root..=root-entity chain; types
    /// branching below the root entity are never consulted.
    chain: HashSet<String>,
    facts: HierarchyFacts,
}

impl HierarchyCollector {
    pub(crate) fn new(chain: HashSet<String>) -> Self {
        Self {
            chain,
            facts: HierarchyFacts::default(),
        }
    }

    pub(crate) fn into_facts(self) -> HierarchyFacts {
        self.facts
    }
}

impl TypeConsumer for HierarchyCollector {
    fn accept(&mut self, _id: NodeId, node: &TypeNode) -> Result<(), CategorizeError> {
        if !self.chain.contains(node.name()) {
            return Ok(());
        }
        let by = node.name();

        for marker in &node.class.markers {
            match marker {
                Marker::Inheritance { strategy } => {
                    first_wins(&mut self.facts.inheritance, *strategy, by, "inheritance strategy")
                }
                Marker::OptimisticLocking { style } => {
                    first_wins(&mut self.facts.locking, *style, by, "optimistic locking")
                }
                Marker::Cache { region, access } => first_wins(
                    &mut self.facts.cache,
                    CacheSpec {
                        region: region.clone(),
                        access: *access,
                    },
                    by,
                    "cache",
                ),
                Marker::NaturalIdCache { region } => first_wins(
                    &mut self.facts.natural_id_cache,
                    region.clone(),
                    by,
                    "natural-id cache",
                ),
                Marker::IdClass { class } => {
                    first_wins(&mut self.facts.id_class, class.clone(), by, "id-class")
                }
                _ => {}
            }
        }

        for attribute in &node.attributes {
            if attribute.member.is_identifier() {
                self.facts.identifiers.add(attribute.clone());
            } else if attribute.member.has(MarkerKind::Version) {
                if self.facts.version.is_none() {
                    self.facts.version = Some(attribute.clone());
                } else {
                    warn!(class = %by, member = %attribute.name, "extra version member ignored");
                }
            } else if attribute.member.has(MarkerKind::TenantId) {
                if self.facts.tenant.is_none() {
                    self.facts.tenant = Some(attribute.clone());
                } else {
                    warn!(class = %by, member = %attribute.name, "extra tenant member ignored");
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::node::{EntityFacts, HierarchyRelation, TypeArena, TypeKind};
    use ormbind_model::{AccessKind, ClassDetails, MemberDetails, ModelRegistry};

    fn node(class: ClassDetails, registry: &ModelRegistry) -> TypeNode {
        let attributes = class
            .fields
            .iter()
            .map(|m| AttributeMetadata::resolve(registry, &class, m).unwrap())
            .collect();
        let kind = if class.is_entity() {
            TypeKind::Entity(EntityFacts::from_class(&class))
        } else {
            TypeKind::MappedSuperclass
        };
        TypeNode {
            class,
            kind,
            relation: HierarchyRelation::Root,
            access: AccessKind::Field,
            attributes,
            super_id: None,
            sub_ids: Vec::new(),
        }
    }

    fn accept_all(collector: &mut HierarchyCollector, nodes: Vec<TypeNode>) {
        let mut arena = TypeArena::new();
        for n in nodes {
            let id = arena.push(n);
            collector.accept(id, arena.node(id)).unwrap();
        }
    }

    fn chain(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_wins_keeps_root_ward_declaration() {
        let registry = ModelRegistry::new();
        let mut collector = HierarchyCollector::new(chain(&["Audited", "Payment"]));
        accept_all(
            &mut collector,
            vec![
                node(
                    ClassDetails::new("Audited")
                        .with_marker(Marker::MappedSuperclass)
                        .with_marker(Marker::Inheritance {
                            strategy: InheritanceKind::Joined,
                        }),
                    &registry,
                ),
                node(
                    ClassDetails::new("Payment")
                        .with_marker(Marker::Entity { name: None })
                        .with_marker(Marker::Inheritance {
                            strategy: InheritanceKind::TablePerClass,
                        }),
                    &registry,
                ),
            ],
        );
        assert_eq!(collector.into_facts().inheritance(), InheritanceKind::Joined);
    }

    #[test]
    fn test_types_off_the_chain_are_ignored() {
        let registry = ModelRegistry::new();
        let mut collector = HierarchyCollector::new(chain(&["Payment"]));
        accept_all(
            &mut collector,
            vec![
                node(
                    ClassDetails::new("Payment").with_marker(Marker::Entity { name: None }),
                    &registry,
                ),
                // A sub-type below the root entity must not set hierarchy facts.
                node(
                    ClassDetails::new("CardPayment")
                        .with_marker(Marker::Entity { name: None })
                        .with_marker(Marker::Inheritance {
                            strategy: InheritanceKind::Joined,
                        }),
                    &registry,
                ),
            ],
        );
        assert_eq!(
            collector.into_facts().inheritance(),
            InheritanceKind::SingleTable
        );
    }

    #[test]
    fn test_identifier_escalates_to_list() {
        let registry = ModelRegistry::new();
        let mut collector = HierarchyCollector::new(chain(&["Assignment"]));
        accept_all(
            &mut collector,
            vec![node(
                ClassDetails::new("Assignment")
                    .with_marker(Marker::Entity { name: None })
                    .with_field(MemberDetails::field("employee_id").with_marker(Marker::Id))
                    .with_field(MemberDetails::field("project_id").with_marker(Marker::Id)),
                &registry,
            )],
        );
        let mut facts = collector.into_facts();
        match facts.take_identifier("Assignment") {
            Ok(IdentifierMapping::NonAggregated { attributes, id_class }) => {
                assert_eq!(attributes.len(), 2);
                assert!(id_class.is_none());
            }
            other => panic!("Expected non-aggregated identifier, got {other:?}"),
        }
    }

    #[test]
    fn test_identifier_shapes() {
        let registry = ModelRegistry::new();

        let mut collector = HierarchyCollector::new(chain(&["Payment"]));
        accept_all(
            &mut collector,
            vec![node(
                ClassDetails::new("Payment")
                    .with_marker(Marker::Entity { name: None })
                    .with_field(MemberDetails::field("id").with_marker(Marker::Id)),
                &registry,
            )],
        );
        assert!(matches!(
            collector.into_facts().take_identifier("Payment"),
            Ok(IdentifierMapping::Basic { .. })
        ));

        let mut collector = HierarchyCollector::new(chain(&["Payment"]));
        accept_all(
            &mut collector,
            vec![node(
                ClassDetails::new("Payment")
                    .with_marker(Marker::Entity { name: None })
                    .with_field(MemberDetails::field("key").with_marker(Marker::EmbeddedId)),
                &registry,
            )],
        );
        assert!(matches!(
            collector.into_facts().take_identifier("Payment"),
            Ok(IdentifierMapping::Aggregated { .. })
        ));
    }

    #[test]
    fn test_missing_identifier() {
        let registry = ModelRegistry::new();
        let mut collector = HierarchyCollector::new(chain(&["Payment"]));
        accept_all(
            &mut collector,
            vec![node(
                ClassDetails::new("Payment")
                    .with_marker(Marker::Entity { name: None })
                    .with_field(MemberDetails::field("amount")),
                &registry,
            )],
        );
        assert!(matches!(
            collector.into_facts().take_identifier("Payment"),
            Err(CategorizeError::MissingIdentifier { .. })
        ));
    }

    #[test]
    fn test_to_one_identifier_rejected() {
        let registry = ModelRegistry::new();
        let mut collector = HierarchyCollector::new(chain(&["Badge"]));
        accept_all(
            &mut collector,
            vec![node(
                ClassDetails::new("Badge")
                    .with_marker(Marker::Entity { name: None })
                    .with_field(
                        MemberDetails::field("holder")
                            .with_marker(Marker::Id)
                            .with_marker(Marker::OneToOne),
                    ),
                &registry,
            )],
        );
        match collector.into_facts().take_identifier("Badge") {
            Err(CategorizeError::UnexpectedIdentifierNature { nature, .. }) => {
                assert_eq!(nature, AttributeNature::ToOne);
            }
            other => panic!("Expected unexpected-identifier-nature error, got {other:?}"),
        }
    }

    #[test]
    fn test_version_and_tenant_first_found() {
        let registry = ModelRegistry::new();
        let mut collector = HierarchyCollector::new(chain(&["Audited", "Payment"]));
        accept_all(
            &mut collector,
            vec![
                node(
                    ClassDetails::new("Audited")
                        .with_marker(Marker::MappedSuperclass)
                        .with_field(MemberDetails::field("revision").with_marker(Marker::Version)),
                    &registry,
                ),
                node(
                    ClassDetails::new("Payment")
                        .with_marker(Marker::Entity { name: None })
                        .with_field(MemberDetails::field("id").with_marker(Marker::Id))
                        .with_field(MemberDetails::field("version").with_marker(Marker::Version))
                        .with_field(MemberDetails::field("tenant").with_marker(Marker::TenantId)),
                    &registry,
                ),
            ],
        );
        let facts = collector.into_facts();
        assert_eq!(facts.version.as_ref().map(|a| a.name.as_str()), Some("revision"));
        assert_eq!(facts.tenant.as_ref().map(|a| a.name.as_str()), Some("tenant"));
    }

    #[test]
    fn test_cache_defaults() {
        let registry = ModelRegistry::new();
        let mut collector = HierarchyCollector::new(chain(&["Payment"]));
        accept_all(
            &mut collector,
            vec![node(
                ClassDetails::new("Payment")
                    .with_marker(Marker::Entity { name: None })
                    .with_marker(Marker::Cache {
                        region: None,
                        access: None,
                    })
                    .with_marker(Marker::NaturalIdCache { region: None }),
                &registry,
            )],
        );
        let facts = collector.into_facts();
        let cache = facts.cache_policy("Payment").unwrap();
        assert_eq!(cache.region, "Payment");
        assert_eq!(cache.access, CacheAccess::ReadWrite);
        assert_eq!(
            facts.natural_id_region("Payment").as_deref(),
            Some("Payment##NaturalId")
        );
    }
}
