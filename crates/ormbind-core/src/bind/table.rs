//! Table binding.

use super::error::BindError;
use super::naming::NamingStrategy;
use super::state::BindingState;
use crate::categorize::TypeNode;
use crate::schema::{Table, TableId, TableKind};
use ormbind_model::{ClassDetails, Marker, MarkerKind};

/// Bind the primary table of an entity: explicit name, derived query, or
/// an implicit name from the naming strategy. Declaring an explicit table
/// and a derived table together is a configuration error. Table-per-class
/// subclasses pass the table their own table builds on.
pub(crate) fn bind_primary(
    state: &mut BindingState,
    naming: &dyn NamingStrategy,
    node: &TypeNode,
    union_included: Option<TableId>,
) -> Result<TableId, BindError> {
    let explicit = match node.class.marker(MarkerKind::Table) {
        Some(Marker::Table { name }) => Some(name.clone()),
        _ => None,
    };
    let derived = match node.class.marker(MarkerKind::DerivedTable) {
        Some(Marker::DerivedTable { query }) => Some(query.clone()),
        _ => None,
    };
    if explicit.is_some() && derived.is_some() {
        return Err(BindError::ConflictingTableSources {
            class: node.name().to_string(),
        });
    }

    let entity_name = node
        .entity_facts()
        .map_or_else(|| node.name(), |f| f.entity_name.as_str());
    let logical = explicit.unwrap_or_else(|| naming.table_name(entity_name));
    let kind = match (union_included, derived) {
        (Some(included), _) => TableKind::Union { included },
        (None, Some(query)) => TableKind::Derived { query },
        (None, None) => TableKind::Physical,
    };
    let physical = naming.physical_name(&logical);
    Ok(state.add_table(Table::new(logical, physical, kind)))
}

/// Bind every secondary table declared on a class, in declaration order.
pub(crate) fn bind_secondary(
    state: &mut BindingState,
    naming: &dyn NamingStrategy,
    class: &ClassDetails,
) -> Vec<TableId> {
    class
        .markers_of(MarkerKind::SecondaryTable)
        .filter_map(|marker| match marker {
            Marker::SecondaryTable { name } => Some(name.clone()),
            _ => None,
        })
        .map(|name| {
            let physical = naming.physical_name(&name);
            let kind = TableKind::Secondary {
                owner: class.name.clone(),
            };
            state.add_table(Table::new(name, physical, kind))
        })
        .collect()
}
