//! Attribute binding.
//!
//! Runs from deferred value steps, after every type's skeleton binding and
//! table exist. Identifier, version, and tenant members never pass through
//! here; they bind directly during the root's skeleton pass via
//! [`bind_direct`].

use super::error::BindError;
use super::naming::NamingStrategy;
use super::state::BindingState;
use crate::categorize::{AttributeMetadata, AttributeNature, EntityHierarchy};
use crate::schema::{BasicValue, BindingId, Column, ColumnRef, ComponentValue, Property, TableId};
use ormbind_model::{ColumnSpec, Marker, MarkerKind, MemberDetails};

/// Bind one non-special attribute onto its type binding.
pub(crate) fn bind_attribute(
    state: &mut BindingState,
    naming: &dyn NamingStrategy,
    hierarchy: &EntityHierarchy,
    binding_id: BindingId,
    attr: &AttributeMetadata,
) -> Result<(), BindError> {
    match attr.nature {
        AttributeNature::Basic => bind_basic(state, naming, hierarchy, binding_id, attr),
        AttributeNature::Embedded => bind_component(state, binding_id, attr),
        AttributeNature::ToOne | AttributeNature::Plural | AttributeNature::Any => {
            Err(BindError::UnsupportedNature {
                class: attr.declared_by.clone(),
                member: attr.name.clone(),
                nature: attr.nature,
            })
        }
    }
}

/// Bind a root-pass attribute (identifier, version, tenant) straight onto
/// the given table, bypassing override and table-targeting logic.
pub(crate) fn bind_direct(
    state: &mut BindingState,
    naming: &dyn NamingStrategy,
    hierarchy: &EntityHierarchy,
    attr: &AttributeMetadata,
    table: TableId,
    not_null: bool,
) -> Property {
    let spec = column_spec(&attr.member);
    let name = spec
        .and_then(|s| s.name.clone())
        .unwrap_or_else(|| naming.column_name(&attr.name));
    let mut column = match spec {
        Some(spec) => Column::from_spec(name, spec),
        None => Column::new(name),
    };
    if not_null {
        column = column.not_null();
    }
    let index = state.table_mut(table).add_column(column);
    let value = BasicValue {
        column: ColumnRef { table, index },
        type_name: attr.member.type_name.clone(),
        converter: resolve_converter(hierarchy, attr),
    };
    Property::basic(attr.name.clone(), value)
}

fn bind_basic(
    state: &mut BindingState,
    naming: &dyn NamingStrategy,
    hierarchy: &EntityHierarchy,
    binding_id: BindingId,
    attr: &AttributeMetadata,
) -> Result<(), BindError> {
    let spec = column_spec(&attr.member);
    let spec_table = spec.and_then(|s| s.table.as_deref());
    let target = resolve_target(state, binding_id, attr, spec_table)?;
    let table = match &target {
        Target::Primary(table) | Target::Join { table, .. } => *table,
    };

    let name = hierarchy
        .attribute_overrides
        .get(&attr.name)
        .cloned()
        .or_else(|| spec.and_then(|s| s.name.clone()))
        .unwrap_or_else(|| naming.column_name(&attr.name));
    let column = match spec {
        Some(spec) => Column::from_spec(name, spec),
        None => Column::new(name),
    };
    let index = state.table_mut(table).add_column(column);
    let value = BasicValue {
        column: ColumnRef { table, index },
        type_name: attr.member.type_name.clone(),
        converter: resolve_converter(hierarchy, attr),
    };
    let property = Property::basic(attr.name.clone(), value);

    match target {
        Target::Primary(_) => state.binding_mut(binding_id).properties.push(property),
        Target::Join { owner, join, .. } => state.binding_mut(owner).joins[join]
            .properties
            .push(property),
    }
    Ok(())
}

fn bind_component(
    state: &mut BindingState,
    binding_id: BindingId,
    attr: &AttributeMetadata,
) -> Result<(), BindError> {
    // TODO: walk embeddable classes so component properties bind columns
    // instead of empty shells.
    let value = ComponentValue {
        class: attr.member.type_name.clone(),
        properties: Vec::new(),
    };
    state
        .binding_mut(binding_id)
        .properties
        .push(Property::component(attr.name.clone(), value));
    Ok(())
}

/// Where a bound column and its property land.
enum Target {
    Primary(TableId),
    Join {
        owner: BindingId,
        join: usize,
        table: TableId,
    },
}

/// Resolve the table an attribute binds to. A column naming a table other
/// than the owning type's primary table must match a secondary table
/// already bound on the type or one of its ancestors.
fn resolve_target(
    state: &BindingState,
    binding_id: BindingId,
    attr: &AttributeMetadata,
    spec_table: Option<&str>,
) -> Result<Target, BindError> {
    let binding = state.binding(binding_id);
    let Some(wanted) = spec_table else {
        let table = binding
            .table
            .ok_or_else(|| BindError::NoTableForMappedSuperclass {
                class: binding.class.clone(),
            })?;
        return Ok(Target::Primary(table));
    };

    // Naming the primary table explicitly is the same as naming none.
    if let Some(table) = binding.table {
        if state.table(table).logical_name == wanted {
            return Ok(Target::Primary(table));
        }
    }

    let mut current = Some(binding_id);
    while let Some(id) = current {
        let candidate = state.binding(id);
        for (join, join_binding) in candidate.joins.iter().enumerate() {
            if state.table(join_binding.table).logical_name == wanted {
                return Ok(Target::Join {
                    owner: id,
                    join,
                    table: join_binding.table,
                });
            }
        }
        current = candidate.super_binding;
    }
    Err(BindError::UnknownSecondaryTable {
        class: attr.declared_by.clone(),
        member: attr.name.clone(),
        table: wanted.to_string(),
    })
}

fn column_spec(member: &MemberDetails) -> Option<&ColumnSpec> {
    match member.marker(MarkerKind::Column) {
        Some(Marker::Column(spec)) => Some(spec),
        _ => None,
    }
}

/// Converter precedence: a member-level marker wins outright (including a
/// disabling one), otherwise the hierarchy's class-level registrations
/// apply by attribute path.
fn resolve_converter(hierarchy: &EntityHierarchy, attr: &AttributeMetadata) -> Option<String> {
    match attr.member.marker(MarkerKind::Convert) {
        Some(Marker::Convert { disabled: true, .. }) => None,
        Some(Marker::Convert {
            converter: Some(converter),
            ..
        }) => Some(converter.clone()),
        _ => hierarchy
            .conversion_for(&attr.name)
            .map(|c| c.converter.clone()),
    }
}
