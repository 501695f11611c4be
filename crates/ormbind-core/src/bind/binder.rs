//! The relational binder.
//!
//! Drives two passes over a categorized model: a skeleton pass creating
//! tables and shaped type bindings in arena order (supers before subs),
//! then the deferred second pass for everything cross-referential.

use super::attribute::bind_direct;
use super::error::BindError;
use super::identifier::bind_identifier;
use super::naming::{BindOptions, NamingStrategy};
use super::second_pass::{drain_table_steps, drain_value_queue, TableStep, ValueQueue, ValueStep};
use super::state::BindingState;
use super::table::{bind_primary, bind_secondary};
use crate::categorize::{CategorizedModel, EntityFacts, EntityHierarchy, TypeNode};
use crate::schema::{
    BindingId, BoundModel, CallbackBinding, Column, ColumnRef, CustomSql, FilterBinding,
    RootDetails, SecondaryTableJoin, Shape, SoftDeleteBinding, TableId, TypeBinding,
};
use ormbind_model::{InheritanceKind, Marker, MarkerKind};
use tracing::{info, instrument, warn};

/// Bind a categorized model to relational schema objects.
#[instrument(skip_all)]
pub fn bind(model: &CategorizedModel, options: &BindOptions) -> Result<BoundModel, BindError> {
    let naming = options.naming.as_ref();
    let mut state = BindingState::new();
    let mut table_steps = Vec::new();
    let mut value_queues = Vec::new();

    for hierarchy in &model.hierarchies {
        bind_hierarchy(
            &mut state,
            naming,
            hierarchy,
            &mut table_steps,
            &mut value_queues,
        )?;
    }

    drain_table_steps(&mut state, model, table_steps)?;
    for queue in value_queues {
        drain_value_queue(&mut state, naming, model, queue)?;
    }

    info!(
        tables = state.table_count(),
        types = state.type_count(),
        "bound relational model"
    );
    Ok(state.finish())
}

fn bind_hierarchy(
    state: &mut BindingState,
    naming: &dyn NamingStrategy,
    hierarchy: &EntityHierarchy,
    table_steps: &mut Vec<TableStep>,
    value_queues: &mut Vec<ValueQueue>,
) -> Result<(), BindError> {
    for (node_id, node) in hierarchy.nodes() {
        if !node.is_entity() {
            bind_mapped_superclass(state, hierarchy, node, table_steps)?;
        } else if node_id == hierarchy.root_entity_id() {
            bind_root_entity(state, naming, hierarchy, node)?;
        } else {
            bind_subclass_entity(state, naming, hierarchy, node)?;
        }
        queue_attributes(hierarchy, node, value_queues);
    }
    Ok(())
}

fn bind_root_entity(
    state: &mut BindingState,
    naming: &dyn NamingStrategy,
    hierarchy: &EntityHierarchy,
    node: &TypeNode,
) -> Result<BindingId, BindError> {
    let table = bind_primary(state, naming, node, None)?;
    let joins = bind_joins(state, naming, node);
    let identifier = bind_identifier(state, naming, hierarchy, table)?;
    let version = hierarchy
        .version
        .as_ref()
        .map(|attr| bind_direct(state, naming, hierarchy, attr, table, true));
    let tenant = hierarchy
        .tenant
        .as_ref()
        .map(|attr| bind_direct(state, naming, hierarchy, attr, table, false));
    let soft_delete = bind_soft_delete(state, node, table);
    let filters = collect_filters(node);
    let callbacks = collect_callbacks(node)?;

    let details = RootDetails {
        identifier,
        version,
        tenant,
        cache: hierarchy.cache.clone(),
        natural_id_cache_region: hierarchy.natural_id_cache_region.clone(),
        soft_delete,
        filters,
        callbacks,
    };
    Ok(register_entity(
        state,
        node,
        Shape::Root(details),
        Some(table),
        joins,
        None,
    ))
}

fn bind_subclass_entity(
    state: &mut BindingState,
    naming: &dyn NamingStrategy,
    hierarchy: &EntityHierarchy,
    node: &TypeNode,
) -> Result<BindingId, BindError> {
    warn_root_only_markers(node);
    let ancestor = nearest_entity_ancestor(state, hierarchy, node)?.ok_or_else(|| {
        BindError::MissingBinding {
            class: node.name().to_string(),
        }
    })?;

    let (shape, table) = match hierarchy.inheritance {
        InheritanceKind::SingleTable => {
            (Shape::SingleTableSubclass, state.binding(ancestor).table)
        }
        InheritanceKind::Joined => (
            Shape::JoinedSubclass,
            Some(bind_primary(state, naming, node, None)?),
        ),
        InheritanceKind::TablePerClass => {
            let included =
                state
                    .binding(ancestor)
                    .table
                    .ok_or_else(|| BindError::MissingBinding {
                        class: state.binding(ancestor).class.clone(),
                    })?;
            (
                Shape::UnionSubclass,
                Some(bind_primary(state, naming, node, Some(included))?),
            )
        }
    };
    let joins = bind_joins(state, naming, node);
    Ok(register_entity(
        state,
        node,
        shape,
        table,
        joins,
        Some(ancestor),
    ))
}

fn bind_mapped_superclass(
    state: &mut BindingState,
    hierarchy: &EntityHierarchy,
    node: &TypeNode,
    table_steps: &mut Vec<TableStep>,
) -> Result<BindingId, BindError> {
    warn_root_only_markers(node);
    let super_binding = nearest_entity_ancestor(state, hierarchy, node)?;
    table_steps.push(TableStep::LinkSupertypeTable {
        class: node.name().to_string(),
    });
    Ok(state.register(TypeBinding {
        class: node.name().to_string(),
        shape: Shape::MappedSuperclass,
        table: None,
        properties: Vec::new(),
        joins: Vec::new(),
        super_binding,
        batch_size: None,
        mutable: true,
        lazy: true,
        custom_sql: None,
    }))
}

/// Register an entity binding, pulling entity facts onto it.
fn register_entity(
    state: &mut BindingState,
    node: &TypeNode,
    shape: Shape,
    table: Option<TableId>,
    joins: Vec<SecondaryTableJoin>,
    super_binding: Option<BindingId>,
) -> BindingId {
    let facts = node.entity_facts();
    state.register(TypeBinding {
        class: node.name().to_string(),
        shape,
        table,
        properties: Vec::new(),
        joins,
        super_binding,
        batch_size: facts.and_then(|f| f.batch_size),
        mutable: facts.map_or(true, |f| f.mutable),
        lazy: facts.map_or(true, |f| f.lazy),
        custom_sql: facts.and_then(custom_sql_of),
    })
}

fn custom_sql_of(facts: &EntityFacts) -> Option<CustomSql> {
    if facts.sql_insert.is_none() && facts.sql_update.is_none() && facts.sql_delete.is_none() {
        return None;
    }
    Some(CustomSql {
        insert: facts.sql_insert.clone(),
        update: facts.sql_update.clone(),
        delete: facts.sql_delete.clone(),
    })
}

/// The nearest entity ancestor's binding, walking through intervening
/// mapped superclasses. `None` when the chain tops out without one.
fn nearest_entity_ancestor(
    state: &BindingState,
    hierarchy: &EntityHierarchy,
    node: &TypeNode,
) -> Result<Option<BindingId>, BindError> {
    let mut current = node.super_id;
    while let Some(id) = current {
        let ancestor = hierarchy.node(id);
        if ancestor.is_entity() {
            return state.expect_binding(ancestor.name()).map(Some);
        }
        current = ancestor.super_id;
    }
    Ok(None)
}

fn bind_joins(
    state: &mut BindingState,
    naming: &dyn NamingStrategy,
    node: &TypeNode,
) -> Vec<SecondaryTableJoin> {
    bind_secondary(state, naming, &node.class)
        .into_iter()
        .map(|table| SecondaryTableJoin {
            table,
            properties: Vec::new(),
        })
        .collect()
}

fn bind_soft_delete(
    state: &mut BindingState,
    node: &TypeNode,
    table: TableId,
) -> Option<SoftDeleteBinding> {
    let column_name = match node.class.marker(MarkerKind::SoftDelete) {
        Some(Marker::SoftDelete { column }) => column
            .clone()
            .unwrap_or_else(|| "deleted".to_string()),
        _ => return None,
    };
    let index = state
        .table_mut(table)
        .add_column(Column::new(column_name).not_null());
    Some(SoftDeleteBinding {
        column: ColumnRef { table, index },
    })
}

fn collect_filters(node: &TypeNode) -> Vec<FilterBinding> {
    node.class
        .markers_of(MarkerKind::Filter)
        .filter_map(|marker| match marker {
            Marker::Filter { name, condition } => Some(FilterBinding {
                name: name.clone(),
                condition: condition.clone(),
            }),
            _ => None,
        })
        .collect()
}

fn collect_callbacks(node: &TypeNode) -> Result<Vec<CallbackBinding>, BindError> {
    let mut callbacks = Vec::new();
    for marker in node.class.markers_of(MarkerKind::LifecycleCallback) {
        if let Marker::LifecycleCallback { event, method } = marker {
            if node.class.method(method).is_none() {
                return Err(BindError::CallbackMethodNotFound {
                    class: node.name().to_string(),
                    method: method.clone(),
                });
            }
            callbacks.push(CallbackBinding {
                event: *event,
                method: method.clone(),
            });
        }
    }
    Ok(callbacks)
}

/// Queue every non-special attribute of a node as a deferred value step.
fn queue_attributes(
    hierarchy: &EntityHierarchy,
    node: &TypeNode,
    value_queues: &mut Vec<ValueQueue>,
) {
    let steps: Vec<ValueStep> = node
        .attributes
        .iter()
        .filter(|attr| !hierarchy.is_special_member(node.name(), &attr.name))
        .map(|attr| ValueStep::BindAttribute {
            class: node.name().to_string(),
            attribute: attr.name.clone(),
        })
        .collect();
    value_queues.push(ValueQueue {
        class: node.name().to_string(),
        steps,
    });
}

/// Soft delete, filters, and lifecycle callbacks bind at the hierarchy
/// root only; declarations elsewhere are ignored.
fn warn_root_only_markers(node: &TypeNode) {
    for kind in [
        MarkerKind::SoftDelete,
        MarkerKind::Filter,
        MarkerKind::LifecycleCallback,
    ] {
        if node.class.has(kind) {
            warn!(
                class = %node.name(),
                marker = ?kind,
                "marker binds at the hierarchy root only; ignored here"
            );
        }
    }
}
