//! Reverse mapping: raw driver rows back into typed entity instances.

use crate::entity::{Entity, EntityDescriptor};
use crate::value::Row;

/// Populate a fresh entity from a raw row.
///
/// Declared columns are visited regular-first, then the identity column.
/// Row labels match physical names case-insensitively and the first match
/// wins; a column absent from the row leaves the field at its `Default`
/// value. Tolerant by design — drivers disagree on label casing and on
/// which columns a `SELECT *` actually returns.
pub fn map_row<E: Entity>(descriptor: &EntityDescriptor, row: &Row) -> E {
    let mut entity = E::default();
    for column in descriptor.mapping_columns() {
        if let Some(value) = row.get_ci(&column.name) {
            entity.set_value(column.field, value.clone());
        }
    }
    entity
}

/// Map a sequence of rows, preserving row order. Empty input yields an
/// empty vector.
pub fn map_rows<E: Entity>(descriptor: &EntityDescriptor, rows: &[Row]) -> Vec<E> {
    rows.iter().map(|row| map_row(descriptor, row)).collect()
}
