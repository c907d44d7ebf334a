//! Single-slot cache for the resolved available-locale list.

use std::sync::{Arc, OnceLock, RwLock};

/// Holds at most one resolved locale list. Not keyed: the list depends only on
/// configuration, so one slot covers the whole process.
///
/// A poisoned lock is treated as a cache miss; the cache is an optimisation
/// and never a source of errors.
#[derive(Debug, Default)]
pub struct LocaleCache {
    slot: RwLock<Option<Vec<String>>>,
}

impl LocaleCache {
    /// Create a private cache (useful for tests and isolated resolvers).
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache shared by every resolver that does not opt out.
    pub fn shared() -> Arc<LocaleCache> {
        static SHARED: OnceLock<Arc<LocaleCache>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(LocaleCache::new())).clone()
    }

    pub fn get(&self) -> Option<Vec<String>> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }

    pub fn store(&self, locales: Vec<String>) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(locales);
        }
    }

    /// Explicit invalidation. The only way an entry leaves the cache.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }

    pub fn is_populated(&self) -> bool {
        self.slot
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }
}
