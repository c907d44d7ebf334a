use std::collections::BTreeMap;
use std::sync::Arc;

use super::{EntityType, Model};
use crate::error::ConfigError;

/// Name -> entity type lookup used when a field only knows a type by name.
///
/// Names may be given fully qualified (`App\Models\Category`,
/// `app::models::Category`); lookups fall back to the last path segment.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    types: BTreeMap<String, Arc<EntityType>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor. Re-registering a name replaces it.
    pub fn register(&mut self, entity: EntityType) -> Result<Arc<EntityType>, ConfigError> {
        entity.validate()?;
        let entity = Arc::new(entity);
        self.types.insert(entity.name().to_string(), entity.clone());
        Ok(entity)
    }

    pub fn register_model<M: Model>(&mut self) -> Result<Arc<EntityType>, ConfigError> {
        self.register(M::entity_type())
    }

    /// Builder form of [`register_model`](Self::register_model).
    pub fn with_model<M: Model>(mut self) -> Result<Self, ConfigError> {
        self.register_model::<M>()?;
        Ok(self)
    }

    /// Render-time lookup: a miss is simply `None`.
    pub fn get(&self, name: &str) -> Option<Arc<EntityType>> {
        if let Some(entity) = self.types.get(name) {
            return Some(entity.clone());
        }
        let short = short_name(name);
        if short != name {
            return self.types.get(short).cloned();
        }
        None
    }

    /// Setup-time lookup: a miss is a configuration error.
    pub fn resolve(&self, name: &str) -> Result<Arc<EntityType>, ConfigError> {
        if name.trim().is_empty() {
            return Err(ConfigError::UnknownEntityType(name.to_string()));
        }
        self.get(name)
            .ok_or_else(|| ConfigError::UnknownEntityType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Last segment of a `\`- or `::`-separated type path.
pub(crate) fn short_name(name: &str) -> &str {
    let after_backslash = name.rsplit('\\').next().unwrap_or(name);
    after_backslash.rsplit("::").next().unwrap_or(after_backslash)
}
