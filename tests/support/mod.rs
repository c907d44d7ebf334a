//! Shared fixtures: a seeded in-memory catalogue behind a full service
//! bundle.

#![allow(dead_code)]

pub mod models;

use std::sync::Arc;

use serde_json::json;
use translatable_select::{
    EntityKey, EntityRegistry, EntityStore, EntityType, InMemoryEntityStore, JsonConfigStore,
    LocaleCache, LocaleResolver, LocaleStrategy, Query, Record, SelectConfig, SelectServices,
    StoreError, Translations,
};

use models::{Author, Category, Product, Tag};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Manual strategy over `[en, ku, ar]`, fallback locale `en`.
pub fn config() -> SelectConfig {
    SelectConfig {
        locale_strategy: LocaleStrategy::Manual,
        manual_locales: vec!["en".into(), "ku".into(), "ar".into()],
        ..SelectConfig::default()
    }
}

pub fn registry() -> EntityRegistry {
    EntityRegistry::new()
        .with_model::<Category>()
        .and_then(|r| r.with_model::<Product>())
        .and_then(|r| r.with_model::<Tag>())
        .and_then(|r| r.with_model::<Author>())
        .unwrap()
}

pub struct Catalogue {
    pub services: SelectServices<InMemoryEntityStore>,
    pub store: InMemoryEntityStore,
}

impl Catalogue {
    pub fn entity(&self, name: &str) -> Arc<EntityType> {
        self.services.registry().resolve(name).unwrap()
    }
}

pub fn catalogue() -> Catalogue {
    catalogue_with(config(), InMemoryEntityStore::new())
}

/// Seeded catalogue with its own locale cache, so tests never share one.
pub fn catalogue_with(config: SelectConfig, store: InMemoryEntityStore) -> Catalogue {
    init_tracing();
    seed(&store);

    let host_config = JsonConfigStore::new(json!({ "app": { "fallback_locale": "en" } }));
    let resolver = LocaleResolver::new(&config, Arc::new(host_config))
        .with_cache(Arc::new(LocaleCache::new()));
    let services = SelectServices::with_resolver(config, resolver, registry(), store.clone());
    Catalogue { services, store }
}

/// A store whose backend is always down.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreachableStore;

impl EntityStore for UnreachableStore {
    fn driver(&self) -> &str {
        "mysql"
    }

    fn fetch(&self, _query: &Query) -> Result<Vec<Record>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    fn find(&self, _entity: &EntityType, _key: &EntityKey) -> Result<Option<Record>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    fn find_many(&self, _entity: &EntityType, _keys: &[EntityKey]) -> Result<Vec<Record>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }
}

/// Full service bundle over [`UnreachableStore`].
pub fn unreachable_services() -> SelectServices<UnreachableStore> {
    init_tracing();
    let config = config();
    let resolver = LocaleResolver::new(&config, Arc::new(JsonConfigStore::default()))
        .with_cache(Arc::new(LocaleCache::new()));
    SelectServices::with_resolver(config, resolver, registry(), UnreachableStore)
}

pub fn seed(store: &InMemoryEntityStore) {
    let categories = [
        Category::new(
            1,
            "technology",
            Translations::from([("en", "Technology"), ("ku", "تەکنەلۆژیا"), ("ar", "تكنولوجيا")]),
        ),
        Category::new(
            2,
            "sports",
            Translations::from([("en", "Sports"), ("ku", "وەرزش"), ("ar", "رياضة")]),
        ),
        Category::new(3, "kurdish-only", Translations::from([("ku", "تەنها کوردی")])),
    ];
    for category in &categories {
        store.insert(category).unwrap();
    }

    let products = [
        Product::new(10, 1, true, Translations::from([("en", "Laptop"), ("ar", "حاسوب محمول")])),
        Product::new(11, 2, true, Translations::from([("en", "Football"), ("ar", "كرة القدم")])),
        Product::new(12, 1, false, Translations::from([("en", "Old Laptop")])),
    ];
    for product in &products {
        store.insert(product).unwrap();
    }

    let tags = [
        Tag {
            id: 20,
            name: Translations::from([("en", "Red"), ("ku", "سوور")]),
        },
        Tag {
            id: 21,
            name: Translations::from([("en", "Blue"), ("ar", "أزرق")]),
        },
    ];
    for tag in &tags {
        store.insert(tag).unwrap();
    }

    for (code, name, books) in [("a-1", "Ahmed Mukhtar", 12), ("a-2", "Sara Omar", 3)] {
        store
            .insert(&Author {
                code: code.into(),
                name: name.into(),
                books,
            })
            .unwrap();
    }
}
