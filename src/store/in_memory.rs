//! InMemoryEntityStore - HashMap-backed store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::trace;

use super::EntityStore;
use crate::entity::{EntityKey, EntityType, Model, Record, Translatable};
use crate::error::StoreError;
use crate::query::Query;

/// In-memory store keyed by table name.
///
/// Natural order is insertion order; re-inserting a key replaces the record
/// in place. Search predicates are evaluated with the same semantics the SQL
/// templates express. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryEntityStore {
    driver: String,
    tables: Arc<RwLock<HashMap<String, Vec<Record>>>>,
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::with_driver("memory")
    }

    /// Report a different driver name (to exercise dialect selection).
    pub fn with_driver(driver: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Serialize and store a model.
    pub fn insert<M: Model>(&self, model: &M) -> Result<Record, StoreError> {
        let record = Record::from_model(model)?;
        self.insert_record(record.clone())?;
        Ok(record)
    }

    pub fn insert_record(&self, record: Record) -> Result<(), StoreError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::LockPoisoned("insert"))?;

        let rows = tables
            .entry(record.entity_type().table().to_string())
            .or_default();
        match rows.iter_mut().find(|row| row.key() == record.key()) {
            Some(existing) => *existing = record,
            None => rows.push(record),
        }
        Ok(())
    }

    /// Delete by key. Returns true if it existed.
    pub fn remove(&self, entity: &EntityType, key: &EntityKey) -> Result<bool, StoreError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::LockPoisoned("remove"))?;

        let Some(rows) = tables.get_mut(entity.table()) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|row| row.key() != key);
        Ok(rows.len() != before)
    }

    pub fn count(&self, entity: &EntityType) -> Result<usize, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::LockPoisoned("count"))?;
        Ok(tables.get(entity.table()).map_or(0, Vec::len))
    }
}

impl EntityStore for InMemoryEntityStore {
    fn driver(&self) -> &str {
        &self.driver
    }

    fn fetch(&self, query: &Query) -> Result<Vec<Record>, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::LockPoisoned("fetch"))?;

        let Some(rows) = tables.get(query.entity().table()) else {
            return Ok(Vec::new());
        };
        let limit = query.limit_value().unwrap_or(usize::MAX);
        let results: Vec<Record> = rows
            .iter()
            .filter(|row| query.matches(row.attributes()))
            .take(limit)
            .cloned()
            .collect();

        trace!(
            table = query.entity().table(),
            scanned = rows.len(),
            matched = results.len(),
            "in-memory fetch"
        );
        Ok(results)
    }

    fn find(&self, entity: &EntityType, key: &EntityKey) -> Result<Option<Record>, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::LockPoisoned("find"))?;

        Ok(tables
            .get(entity.table())
            .and_then(|rows| rows.iter().find(|row| row.key() == key))
            .cloned())
    }

    fn find_many(&self, entity: &EntityType, keys: &[EntityKey]) -> Result<Vec<Record>, StoreError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::LockPoisoned("find_many"))?;

        Ok(tables
            .get(entity.table())
            .map(|rows| {
                rows.iter()
                    .filter(|row| keys.contains(row.key()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
