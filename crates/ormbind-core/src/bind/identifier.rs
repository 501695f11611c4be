//! Identifier binding.

use super::attribute::bind_direct;
use super::error::BindError;
use super::naming::NamingStrategy;
use super::state::BindingState;
use crate::categorize::{EntityHierarchy, IdentifierMapping};
use crate::schema::{ComponentValue, IdentifierBinding, Property, TableId};

/// Bind the hierarchy identifier onto the root entity's table.
///
/// A basic identifier binds one non-nullable column, added to the value and
/// then to the table's primary key. An aggregated identifier binds a
/// component shell carrying the embeddable class. Non-aggregated
/// identifiers are a known gap and fail immediately.
pub(crate) fn bind_identifier(
    state: &mut BindingState,
    naming: &dyn NamingStrategy,
    hierarchy: &EntityHierarchy,
    table: TableId,
) -> Result<IdentifierBinding, BindError> {
    match &hierarchy.identifier {
        IdentifierMapping::Basic { attribute } => {
            let property = bind_direct(state, naming, hierarchy, attribute, table, true);
            if let Some(column) = property.column() {
                state
                    .table_mut(table)
                    .primary_key
                    .columns
                    .push(column.index);
            }
            Ok(IdentifierBinding::Basic { property })
        }
        IdentifierMapping::Aggregated { attribute } => {
            let value = ComponentValue {
                class: attribute.member.type_name.clone(),
                properties: Vec::new(),
            };
            Ok(IdentifierBinding::Aggregated {
                property: Property::component(attribute.name.clone(), value),
            })
        }
        IdentifierMapping::NonAggregated { .. } => Err(BindError::UnsupportedIdentifier {
            class: hierarchy.root_entity().name().to_string(),
        }),
    }
}
