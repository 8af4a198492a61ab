use std::future::Future;

use crate::error::DataError;
use crate::filter::Filter;

/// Generic async repository contract for CRUD operations.
///
/// Uses RPITIT (return-position `impl Trait` in traits) — no `async-trait`
/// needed. Implemented for any statement executor by
/// [`crate::SqlRepository`]; applications can also implement it directly
/// over a fixed entity for handler-facing fakes.
pub trait Repository<E, Id>: Send + Sync
where
    E: Send + Sync + 'static,
    Id: Send + Sync + 'static,
{
    /// Look up a single record by identity. `Ok(None)` means not found —
    /// a present-but-empty outcome, not an error.
    fn find_by_id(&self, id: &Id) -> impl Future<Output = Result<Option<E>, DataError>> + Send;

    /// Fetch every record matching the filter; `None` fetches the whole
    /// table. Zero matches is an empty vector, never an error.
    fn find(&self, filter: Option<&Filter>)
        -> impl Future<Output = Result<Vec<E>, DataError>> + Send;

    /// Insert a (possibly partial) entity and return the stored record.
    fn save(&self, entity: &E) -> impl Future<Output = Result<E, DataError>> + Send;

    /// Overwrite the full row identified by `id` and return the stored
    /// record. Fields not set on `entity` are written as NULL.
    fn update(&self, id: &Id, entity: &E) -> impl Future<Output = Result<E, DataError>> + Send;

    /// Delete by identity. Deleting an id that does not exist still
    /// succeeds.
    fn delete(&self, id: &Id) -> impl Future<Output = Result<(), DataError>> + Send;

    /// Count records matching the filter (`None` counts the table).
    fn count(&self, filter: Option<&Filter>)
        -> impl Future<Output = Result<u64, DataError>> + Send;
}
