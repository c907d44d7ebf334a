//! LocaleResolver - which locales apply, application-wide or per entity type.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::{dedup_locales, LocaleCache, LocaleContext, LocaleStrategy, PluginLocaleSource, Translations, DEFAULT_LOCALE};
use crate::config::{locale_list, ConfigStore, SelectConfig};
use crate::entity::EntityType;

/// Resolves ordered locale sets and picks display locales.
///
/// Never fails: configuration and plugin lookups that error are logged and
/// treated as "not found", and every resolution ends in a non-empty list.
pub struct LocaleResolver {
    strategy: LocaleStrategy,
    manual_locales: Vec<String>,
    config_keys: Vec<String>,
    fallback_locale_key: String,
    cache_enabled: bool,
    config: Arc<dyn ConfigStore>,
    plugin: Option<Arc<dyn PluginLocaleSource>>,
    cache: Arc<LocaleCache>,
}

impl LocaleResolver {
    /// A resolver backed by the process-wide locale cache.
    pub fn new(settings: &SelectConfig, config: Arc<dyn ConfigStore>) -> Self {
        Self {
            strategy: settings.locale_strategy,
            manual_locales: settings.manual_locales.clone(),
            config_keys: settings.config_keys.clone(),
            fallback_locale_key: settings.fallback_locale_key.clone(),
            cache_enabled: settings.cache_locales,
            config,
            plugin: None,
            cache: LocaleCache::shared(),
        }
    }

    pub fn with_plugin(mut self, plugin: Arc<dyn PluginLocaleSource>) -> Self {
        self.plugin = Some(plugin);
        self
    }

    /// Use a private cache instead of the process-wide one.
    pub fn with_cache(mut self, cache: Arc<LocaleCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn strategy(&self) -> LocaleStrategy {
        self.strategy
    }

    pub fn cache(&self) -> &Arc<LocaleCache> {
        &self.cache
    }

    /// The request's active locale.
    pub fn current_locale<'a>(&self, ctx: &'a LocaleContext) -> &'a str {
        ctx.locale()
    }

    /// The configured fallback locale, `en` when unset or unreadable.
    pub fn fallback_locale(&self) -> String {
        match self.config.get(&self.fallback_locale_key) {
            Ok(Some(Value::String(locale))) if !locale.is_empty() => locale,
            Ok(_) => DEFAULT_LOCALE.to_string(),
            Err(e) => {
                warn!(key = %self.fallback_locale_key, error = %e, "fallback locale lookup failed");
                DEFAULT_LOCALE.to_string()
            }
        }
    }

    /// Application-wide locale list according to the configured strategy.
    /// Deduplicated and never empty.
    ///
    /// Only lists read from the plugin, configuration or manual settings are
    /// cached. The `[current, fallback]` stand-in depends on the request and
    /// is rebuilt every time.
    pub fn available_locales(&self, ctx: &LocaleContext) -> Vec<String> {
        if self.cache_enabled {
            if let Some(cached) = self.cache.get() {
                return cached;
            }
        }

        match self.listed_locales() {
            Some(listed) => {
                debug!(strategy = %self.strategy, locales = ?listed, "resolved available locales");
                if self.cache_enabled {
                    self.cache.store(listed.clone());
                }
                listed
            }
            None => {
                let derived = self.unlisted_locales(ctx);
                debug!(strategy = %self.strategy, locales = ?derived, "derived available locales");
                derived
            }
        }
    }

    /// Drop the cached locale list.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// The explicitly configured list for the strategy, if there is one.
    fn listed_locales(&self) -> Option<Vec<String>> {
        let listed = match self.strategy {
            LocaleStrategy::Manual => Some(dedup_locales(self.manual_locales.iter().cloned())),
            LocaleStrategy::Filament => self.plugin_locales(),
            LocaleStrategy::Config => self.config_key_locales(),
            LocaleStrategy::Auto => self.plugin_locales().or_else(|| self.config_key_locales()),
        };
        listed.filter(|l| !l.is_empty())
    }

    fn unlisted_locales(&self, ctx: &LocaleContext) -> Vec<String> {
        match self.strategy {
            LocaleStrategy::Config | LocaleStrategy::Auto => self.synthesized_locales(ctx),
            LocaleStrategy::Manual | LocaleStrategy::Filament => vec![DEFAULT_LOCALE.to_string()],
        }
    }

    fn plugin_locales(&self) -> Option<Vec<String>> {
        let plugin = self.plugin.as_ref()?;
        match plugin.default_locales() {
            Ok(Some(locales)) => Some(dedup_locales(locales)).filter(|l| !l.is_empty()),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "plugin locale source failed; trying next source");
                None
            }
        }
    }

    fn config_key_locales(&self) -> Option<Vec<String>> {
        self.config_keys.iter().find_map(|key| match self.config.get(key) {
            Ok(Some(value)) => locale_list(&value).map(dedup_locales),
            Ok(None) => None,
            Err(e) => {
                warn!(key = %key, error = %e, "locale config lookup failed");
                None
            }
        })
    }

    fn synthesized_locales(&self, ctx: &LocaleContext) -> Vec<String> {
        dedup_locales([ctx.locale().to_string(), self.fallback_locale()])
    }

    /// Locales to search for an entity type.
    ///
    /// Non-translatable types only ever need the current locale. Translatable
    /// types use their own declared list when they have one.
    pub fn model_locales(&self, entity: &EntityType, ctx: &LocaleContext) -> Vec<String> {
        if !entity.is_translatable() {
            return vec![ctx.locale().to_string()];
        }
        if let Some(declared) = entity.declared_locales() {
            let declared = dedup_locales(declared.iter().cloned());
            if !declared.is_empty() {
                return declared;
            }
        }
        self.available_locales(ctx)
    }

    pub fn translatable_attributes<'e>(&self, entity: &'e EntityType) -> &'e [String] {
        entity.translatable_attributes()
    }

    pub fn is_translatable(&self, entity: &EntityType) -> bool {
        entity.is_translatable()
    }

    /// Pick the locale to display from a translation map.
    ///
    /// Order: `preferred`, the current locale, the fallback locale, then the
    /// first filled entry. `None` when nothing is filled.
    pub fn best_locale_for_display(
        &self,
        translations: &Translations,
        preferred: Option<&str>,
        ctx: &LocaleContext,
    ) -> Option<String> {
        let fallback = self.fallback_locale();
        let preferred = preferred.filter(|l| !l.is_empty());
        translations
            .best_locale(preferred, ctx.locale(), &fallback)
            .map(str::to_string)
    }

    /// `custom` verbatim when given (even empty), otherwise the entity's
    /// locales.
    pub fn resolve_search_locales(
        &self,
        entity: &EntityType,
        custom: Option<&[String]>,
        ctx: &LocaleContext,
    ) -> Vec<String> {
        match custom {
            Some(locales) => locales.to_vec(),
            None => self.model_locales(entity, ctx),
        }
    }
}
