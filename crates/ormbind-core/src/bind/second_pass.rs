//! Deferred binding steps.
//!
//! Cross-referential work is queued during the skeleton pass and drained
//! strictly afterward: the table-level queue first, then each type's
//! value-level queue in skeleton order. Every queue drains exactly once.
//! A step still incomplete after its drain is a binder defect, reported as
//! [`BindError::UnresolvedSecondPass`] instead of being dropped.

use super::attribute::bind_attribute;
use super::error::BindError;
use super::naming::NamingStrategy;
use super::state::BindingState;
use crate::categorize::{CategorizedModel, NodeId};
use std::collections::VecDeque;
use tracing::debug;

/// Table-level deferred steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TableStep {
    /// Point a mapped superclass's table reference at the table of its
    /// nearest entity descendant.
    LinkSupertypeTable { class: String },
}

impl TableStep {
    pub(crate) fn description(&self) -> String {
        match self {
            TableStep::LinkSupertypeTable { class } => {
                format!("link supertype table for {class}")
            }
        }
    }

    /// Run once. `Ok(false)` signals an unmet internal dependency.
    pub(crate) fn run(
        &self,
        state: &mut BindingState,
        model: &CategorizedModel,
    ) -> Result<bool, BindError> {
        match self {
            TableStep::LinkSupertypeTable { class } => link_supertype_table(state, model, class),
        }
    }
}

fn link_supertype_table(
    state: &mut BindingState,
    model: &CategorizedModel,
    class: &str,
) -> Result<bool, BindError> {
    let Some(hierarchy) = model.hierarchy_of(class) else {
        return Ok(false);
    };
    let Some(node_id) = hierarchy.node_for(class) else {
        return Ok(false);
    };

    // Breadth-first over declared sub-types, so the nearest entity
    // descendant wins.
    let mut frontier: VecDeque<NodeId> =
        hierarchy.node(node_id).sub_ids.iter().copied().collect();
    while let Some(id) = frontier.pop_front() {
        let node = hierarchy.node(id);
        if node.is_entity() {
            let Some(binding) = state.binding_of(node.name()) else {
                return Ok(false);
            };
            let Some(table) = state.binding(binding).table else {
                return Ok(false);
            };
            let owner = state.expect_binding(class)?;
            state.binding_mut(owner).table = Some(table);
            debug!(
                class,
                table = %state.table(table).logical_name,
                "linked supertype table"
            );
            return Ok(true);
        }
        frontier.extend(node.sub_ids.iter().copied());
    }
    // No entity descendant means nothing to link; attributes that need a
    // table fail loudly when they bind.
    Ok(true)
}

/// Value-level deferred steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValueStep {
    /// Bind one non-special attribute of a type.
    BindAttribute { class: String, attribute: String },
}

impl ValueStep {
    pub(crate) fn description(&self) -> String {
        match self {
            ValueStep::BindAttribute { class, attribute } => {
                format!("bind attribute {class}.{attribute}")
            }
        }
    }

    /// Run once. `Ok(false)` signals an unmet internal dependency.
    pub(crate) fn run(
        &self,
        state: &mut BindingState,
        naming: &dyn NamingStrategy,
        model: &CategorizedModel,
    ) -> Result<bool, BindError> {
        match self {
            ValueStep::BindAttribute { class, attribute } => {
                let Some(binding) = state.binding_of(class) else {
                    return Ok(false);
                };
                let Some(hierarchy) = model.hierarchy_of(class) else {
                    return Ok(false);
                };
                let Some(node_id) = hierarchy.node_for(class) else {
                    return Ok(false);
                };
                let Some(attr) = hierarchy.node(node_id).attribute(attribute) else {
                    return Ok(false);
                };
                bind_attribute(state, naming, hierarchy, binding, attr)?;
                Ok(true)
            }
        }
    }
}

/// The value-level steps queued for one type.
#[derive(Debug)]
pub(crate) struct ValueQueue {
    pub(crate) class: String,
    pub(crate) steps: Vec<ValueStep>,
}

/// Drain the table-level queue, exactly once.
pub(crate) fn drain_table_steps(
    state: &mut BindingState,
    model: &CategorizedModel,
    steps: Vec<TableStep>,
) -> Result<(), BindError> {
    let mut unresolved = Vec::new();
    for step in steps {
        debug!(step = %step.description(), "running table step");
        if !step.run(state, model)? {
            unresolved.push(step.description());
        }
    }
    report_unresolved(unresolved)
}

/// Drain one type's value-level queue, exactly once.
pub(crate) fn drain_value_queue(
    state: &mut BindingState,
    naming: &dyn NamingStrategy,
    model: &CategorizedModel,
    queue: ValueQueue,
) -> Result<(), BindError> {
    let mut unresolved = Vec::new();
    for step in queue.steps {
        debug!(class = %queue.class, step = %step.description(), "running value step");
        if !step.run(state, naming, model)? {
            unresolved.push(step.description());
        }
    }
    report_unresolved(unresolved)
}

fn report_unresolved(unresolved: Vec<String>) -> Result<(), BindError> {
    if unresolved.is_empty() {
        Ok(())
    } else {
        Err(BindError::UnresolvedSecondPass {
            count: unresolved.len(),
            steps: unresolved,
        })
    }
}
