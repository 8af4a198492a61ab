use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::entity::{Entity, EntityDescriptor};
use crate::error::DataError;

/// Cache of resolved entity descriptors, keyed by entity type identity.
///
/// Descriptors are a pure function of static type metadata, so concurrent
/// first-time resolution may recompute redundantly; the first inserted
/// descriptor wins and later computations are discarded. Construct one
/// registry per application and share it (`Arc`) across repositories —
/// there is no process-wide singleton.
#[derive(Default)]
pub struct DescriptorRegistry {
    descriptors: RwLock<HashMap<TypeId, Arc<EntityDescriptor>>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the descriptor for `E`, computing and caching it on first
    /// use. Fails with [`DataError::Schema`] when the declaration is not
    /// usable (empty table, no columns, duplicate names, more than one
    /// primary column).
    pub fn resolve<E: Entity>(&self) -> Result<Arc<EntityDescriptor>, DataError> {
        let key = TypeId::of::<E>();
        if let Some(descriptor) = self.descriptors.read().unwrap().get(&key) {
            return Ok(descriptor.clone());
        }

        let descriptor = E::descriptor();
        validate::<E>(&descriptor)?;
        tracing::debug!(
            entity = type_name::<E>(),
            table = descriptor.table(),
            columns = descriptor.columns().len(),
            "registered entity descriptor"
        );

        let mut guard = self.descriptors.write().unwrap();
        let entry = guard.entry(key).or_insert_with(|| Arc::new(descriptor));
        Ok(entry.clone())
    }
}

fn validate<E: Entity>(descriptor: &EntityDescriptor) -> Result<(), DataError> {
    let entity = type_name::<E>();
    if descriptor.table().is_empty() {
        return Err(DataError::Schema(format!(
            "entity `{entity}` declares an empty table name"
        )));
    }
    if descriptor.columns().is_empty() {
        return Err(DataError::Schema(format!(
            "entity `{entity}` declares no columns"
        )));
    }

    let mut fields = HashSet::new();
    let mut names = HashSet::new();
    for column in descriptor.columns() {
        if !fields.insert(column.field) {
            return Err(DataError::Schema(format!(
                "entity `{entity}` declares field `{}` more than once",
                column.field
            )));
        }
        // Physical names collide case-insensitively because row matching does.
        if !names.insert(column.name.to_lowercase()) {
            return Err(DataError::Schema(format!(
                "entity `{entity}` maps two fields to column `{}`",
                column.name
            )));
        }
    }

    let primaries = descriptor.columns().iter().filter(|c| c.primary).count();
    if primaries > 1 {
        return Err(DataError::Schema(format!(
            "entity `{entity}` declares {primaries} primary columns; at most one is supported"
        )));
    }
    Ok(())
}
