//! TranslatableSearchService - cross-locale search and label display.

use std::sync::Arc;

use tracing::debug;

use super::{Formatted, SearchOptions};
use crate::config::SelectConfig;
use crate::entity::{EntityKey, EntityType, Record, Translatable};
use crate::error::{ConfigError, StoreError};
use crate::locale::{LocaleContext, LocaleResolver};
use crate::options::OptionMap;
use crate::query::{
    Dialect, JsonExtraction, Query, QueryModifier, SearchPredicate, SqlRenderer, SqlStatement,
};
use crate::store::EntityStore;

/// Searches any configured locale of any configured field and turns the
/// matches into ordered key/label options.
pub struct TranslatableSearchService<S> {
    store: S,
    locales: Arc<LocaleResolver>,
    case_insensitive: bool,
    default_limit: usize,
    default_label_field: String,
    extraction: JsonExtraction,
}

impl<S: EntityStore> TranslatableSearchService<S> {
    pub fn new(store: S, locales: Arc<LocaleResolver>, config: &SelectConfig) -> Self {
        Self {
            store,
            locales,
            case_insensitive: config.database.case_insensitive,
            default_limit: config.default_limit,
            default_label_field: config.component_defaults.label_field.clone(),
            extraction: JsonExtraction::builtin().with_overrides(&config.database.json_extraction),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn locales(&self) -> &Arc<LocaleResolver> {
        &self.locales
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub fn default_label_field(&self) -> &str {
        &self.default_label_field
    }

    /// Records whose configured fields contain `text` in any searched
    /// locale, in store order.
    ///
    /// Surrounding whitespace is ignored: `" York "` searches for `York`,
    /// and whitespace-only text matches nothing without touching the store.
    pub fn search(
        &self,
        entity: &Arc<EntityType>,
        text: &str,
        options: &SearchOptions,
        ctx: &LocaleContext,
    ) -> Result<Vec<Record>, StoreError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let query = self.build_search_query(entity, text, options, ctx);
        let records = self.store.fetch(&query)?;
        debug!(
            entity = entity.name(),
            text,
            matched = records.len(),
            "translatable search"
        );
        Ok(records)
    }

    /// The query `search` would run: modifier constraints first, then the
    /// OR-ed search predicate (on the trimmed text), then the limit.
    pub fn build_search_query(
        &self,
        entity: &Arc<EntityType>,
        text: &str,
        options: &SearchOptions,
        ctx: &LocaleContext,
    ) -> Query {
        let label_field = options.label().unwrap_or(&self.default_label_field);
        let fields = self.effective_search_fields(entity, options.fields(), label_field);
        let locales = self
            .locales
            .resolve_search_locales(entity, options.locales(), ctx);
        let predicate = self.search_predicate(entity, text.trim(), &fields, &locales);

        let mut query = Query::new(entity.clone());
        if let Some(modifier) = options.modifier() {
            query = modifier(query);
        }
        query
            .with_search(predicate)
            .limit(options.limit_value().unwrap_or(self.default_limit))
    }

    /// One translated match per (translatable field, locale) and one plain
    /// match per other field.
    pub fn search_predicate(
        &self,
        entity: &EntityType,
        needle: &str,
        fields: &[String],
        locales: &[String],
    ) -> SearchPredicate {
        let mut predicate = SearchPredicate::new(needle, self.case_insensitive);
        for field in fields {
            if entity.is_translatable_field(field) {
                for locale in locales {
                    predicate = predicate.translated(field.as_str(), locale.as_str());
                }
            } else {
                predicate = predicate.plain(field.as_str());
            }
        }
        debug!(
            entity = entity.name(),
            fields = ?fields,
            locales = ?locales,
            clauses = predicate.matches().len(),
            "built search predicate"
        );
        predicate
    }

    /// Explicit fields win; otherwise the type's translatable attributes
    /// plus its declared plain search fields; otherwise the label field.
    pub fn effective_search_fields(
        &self,
        entity: &EntityType,
        explicit: &[String],
        label_field: &str,
    ) -> Vec<String> {
        if !explicit.is_empty() {
            return explicit.to_vec();
        }
        let mut fields: Vec<String> = entity.translatable_attributes().to_vec();
        for field in entity.non_translatable_search_fields() {
            if !fields.contains(field) {
                fields.push(field.clone());
            }
        }
        if fields.is_empty() {
            fields.push(label_field.to_string());
        }
        fields
    }

    /// Render a query as SQL for the store's driver.
    pub fn to_sql(&self, query: &Query) -> Result<SqlStatement, ConfigError> {
        let renderer = SqlRenderer::new(
            Dialect::from_driver(self.store.driver()),
            self.extraction.clone(),
        );
        renderer.render_select(query)
    }

    /// Display text of `field`, using the best available locale for
    /// translatable records and the raw value otherwise.
    pub fn translated_label<T: Translatable + ?Sized>(
        &self,
        record: &T,
        field: &str,
        preferred: Option<&str>,
        ctx: &LocaleContext,
    ) -> String {
        if !record.is_translatable() {
            return record.attribute_text(field);
        }
        let translations = record.translations(field);
        if translations.is_empty() {
            return record.attribute_text(field);
        }
        self.locales
            .best_locale_for_display(&translations, preferred, ctx)
            .and_then(|locale| translations.get(&locale).map(str::to_string))
            .unwrap_or_else(|| record.attribute_text(field))
    }

    pub fn translated_labels<'r, I>(
        &self,
        records: I,
        field: &str,
        preferred: Option<&str>,
        ctx: &LocaleContext,
    ) -> OptionMap
    where
        I: IntoIterator<Item = &'r Record>,
    {
        records
            .into_iter()
            .map(|record| {
                (
                    record.key().clone(),
                    self.translated_label(record, field, preferred, ctx),
                )
            })
            .collect()
    }

    /// `search` formatted as options. A formatter replaces the label
    /// lookup; entries it returns overwrite earlier ones with the same key.
    pub fn search_results(
        &self,
        entity: &Arc<EntityType>,
        text: &str,
        options: &SearchOptions,
        ctx: &LocaleContext,
    ) -> Result<OptionMap, StoreError> {
        let records = self.search(entity, text, options, ctx)?;
        let label_field = options.label().unwrap_or(&self.default_label_field);

        let mut results = OptionMap::with_capacity(records.len());
        for record in &records {
            match options.format() {
                Some(formatter) => match formatter(record) {
                    Formatted::Label(label) => {
                        results.insert(record.key().clone(), label);
                    }
                    Formatted::Entries(entries) => results.extend(entries),
                },
                None => {
                    let label = self.translated_label(record, label_field, None, ctx);
                    results.insert(record.key().clone(), label);
                }
            }
        }
        Ok(results)
    }

    /// Unfiltered listing through the same modifier, limit and label path.
    pub fn preload_options(
        &self,
        entity: &Arc<EntityType>,
        label_field: &str,
        modifier: Option<&QueryModifier>,
        limit: usize,
        ctx: &LocaleContext,
    ) -> Result<OptionMap, StoreError> {
        let mut query = Query::new(entity.clone());
        if let Some(modifier) = modifier {
            query = modifier(query);
        }
        let records = self.store.fetch(&query.limit(limit))?;
        debug!(entity = entity.name(), loaded = records.len(), "preloaded options");
        Ok(self.translated_labels(&records, label_field, None, ctx))
    }

    /// Label of a single record; `None` when it does not exist.
    pub fn label_for_key(
        &self,
        entity: &EntityType,
        key: &EntityKey,
        label_field: &str,
        preferred: Option<&str>,
        ctx: &LocaleContext,
    ) -> Result<Option<String>, StoreError> {
        Ok(self
            .store
            .find(entity, key)?
            .map(|record| self.translated_label(&record, label_field, preferred, ctx)))
    }

    /// Labels of the existing records among `keys`, in store order.
    pub fn labels_for_keys(
        &self,
        entity: &EntityType,
        keys: &[EntityKey],
        label_field: &str,
        preferred: Option<&str>,
        ctx: &LocaleContext,
    ) -> Result<OptionMap, StoreError> {
        if keys.is_empty() {
            return Ok(OptionMap::new());
        }
        let records = self.store.find_many(entity, keys)?;
        Ok(self.translated_labels(&records, label_field, preferred, ctx))
    }
}
