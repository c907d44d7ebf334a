//! EntityStore - the data-store boundary the search service runs against.

mod in_memory;

use std::sync::Arc;

use crate::entity::{EntityKey, EntityType, Record};
use crate::error::StoreError;
use crate::query::Query;

pub use in_memory::InMemoryEntityStore;

/// Synchronous access to stored records.
///
/// Results come back in the store's natural order. Failures propagate to the
/// caller untouched; the search layer never retries.
pub trait EntityStore: Send + Sync {
    /// Driver name, used to pick the SQL dialect (`mysql`, `pgsql`, ...).
    fn driver(&self) -> &str;

    /// Records matching the query, at most `query.limit_value()` of them.
    fn fetch(&self, query: &Query) -> Result<Vec<Record>, StoreError>;

    /// A single record by key. `Ok(None)` when it does not exist.
    fn find(&self, entity: &EntityType, key: &EntityKey) -> Result<Option<Record>, StoreError>;

    /// All existing records among `keys`; missing keys are skipped.
    fn find_many(&self, entity: &EntityType, keys: &[EntityKey]) -> Result<Vec<Record>, StoreError>;
}

impl<S: EntityStore + ?Sized> EntityStore for Arc<S> {
    fn driver(&self) -> &str {
        (**self).driver()
    }

    fn fetch(&self, query: &Query) -> Result<Vec<Record>, StoreError> {
        (**self).fetch(query)
    }

    fn find(&self, entity: &EntityType, key: &EntityKey) -> Result<Option<Record>, StoreError> {
        (**self).find(entity, key)
    }

    fn find_many(&self, entity: &EntityType, keys: &[EntityKey]) -> Result<Vec<Record>, StoreError> {
        (**self).find_many(entity, keys)
    }
}
