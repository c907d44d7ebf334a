//! SelectServices - the resolver, search service and registry wired together.

use std::sync::Arc;

use tracing::debug;

use crate::config::{ConfigStore, SelectConfig};
use crate::entity::EntityRegistry;
use crate::error::ConfigError;
use crate::field::TranslatableSelect;
use crate::locale::{LocaleResolver, PluginLocaleSource};
use crate::query::QueryModifier;
use crate::search::TranslatableSearchService;
use crate::store::EntityStore;

/// One shared set of services per application; fields created here pick
/// up the configured component defaults.
///
/// ## Example
///
/// ```ignore
/// let services = SelectServices::new(
///     SelectConfig::default().with_env_overrides()?,
///     Arc::new(JsonConfigStore::from_json_str(APP_CONFIG)?),
///     None,
///     EntityRegistry::new().with_model::<Category>()?,
///     InMemoryEntityStore::new(),
/// );
///
/// let field = services
///     .field_for_model("category_id", "Category", None, None)?
///     .preload(true);
/// ```
pub struct SelectServices<S> {
    config: SelectConfig,
    registry: Arc<EntityRegistry>,
    locales: Arc<LocaleResolver>,
    search: Arc<TranslatableSearchService<S>>,
}

impl<S: EntityStore> SelectServices<S> {
    pub fn new(
        config: SelectConfig,
        config_store: Arc<dyn ConfigStore>,
        plugin: Option<Arc<dyn PluginLocaleSource>>,
        registry: EntityRegistry,
        store: S,
    ) -> Self {
        let mut resolver = LocaleResolver::new(&config, config_store);
        if let Some(plugin) = plugin {
            resolver = resolver.with_plugin(plugin);
        }
        Self::with_resolver(config, resolver, registry, store)
    }

    /// Use an already configured resolver (e.g. one with a private cache).
    pub fn with_resolver(
        config: SelectConfig,
        resolver: LocaleResolver,
        registry: EntityRegistry,
        store: S,
    ) -> Self {
        let locales = Arc::new(resolver);
        let search = Arc::new(TranslatableSearchService::new(store, locales.clone(), &config));
        debug!(
            strategy = %config.locale_strategy,
            entity_types = registry.len(),
            "select services ready"
        );
        Self {
            config,
            registry: Arc::new(registry),
            locales,
            search,
        }
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<EntityRegistry> {
        &self.registry
    }

    pub fn locales(&self) -> &Arc<LocaleResolver> {
        &self.locales
    }

    pub fn search(&self) -> &Arc<TranslatableSearchService<S>> {
        &self.search
    }

    pub fn clear_locale_cache(&self) {
        self.locales.clear_cache();
    }

    /// An unbound field with the configured defaults.
    pub fn field(&self, name: impl Into<String>) -> TranslatableSelect<S> {
        TranslatableSelect::make(name, self.search.clone(), self.registry.clone())
            .apply_defaults(&self.config.component_defaults)
    }

    /// A field bound to a named entity type. `label_field` defaults to the
    /// configured one.
    pub fn field_for_model(
        &self,
        name: impl Into<String>,
        model: &str,
        label_field: Option<&str>,
        modifier: Option<QueryModifier>,
    ) -> Result<TranslatableSelect<S>, ConfigError> {
        let field = self.field(name).model(model)?.modify_query_using(modifier);
        Ok(match label_field {
            Some(label_field) => field.label_field(label_field),
            None => field,
        })
    }

    /// A field bound to a relationship of the form's record.
    pub fn field_for_relationship(
        &self,
        name: impl Into<String>,
        relationship: &str,
        title_attribute: Option<&str>,
        modifier: Option<QueryModifier>,
    ) -> TranslatableSelect<S> {
        self.field(name)
            .relationship(relationship, title_attribute, modifier)
    }
}
