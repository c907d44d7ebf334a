//! Entity-level search shortcuts.
//!
//! Thin wrappers over [`TranslatableSearchService`] for callers that want a
//! one-call answer for an entity type instead of configuring a field.

use std::sync::Arc;

use super::{Formatted, SearchOptions, TranslatableSearchService};
use crate::entity::{EntityKey, EntityType, Record, Translatable};
use crate::error::StoreError;
use crate::locale::{LocaleContext, Translations};
use crate::options::OptionMap;
use crate::query::Query;
use crate::store::EntityStore;

fn options_for(limit: usize, search_fields: Option<&[String]>) -> SearchOptions {
    SearchOptions::new()
        .search_fields(search_fields.unwrap_or_default().iter().cloned())
        .limit(limit)
}

/// Search results labelled with `label_field` (the configured default when
/// `None`).
pub fn search_results_for<S: EntityStore>(
    service: &TranslatableSearchService<S>,
    entity: &Arc<EntityType>,
    text: &str,
    limit: usize,
    label_field: Option<&str>,
    search_fields: Option<&[String]>,
    ctx: &LocaleContext,
) -> Result<OptionMap, StoreError> {
    let mut options = options_for(limit, search_fields);
    if let Some(label_field) = label_field {
        options = options.label_field(label_field);
    }
    service.search_results(entity, text, &options, ctx)
}

/// Search results labelled by a formatter.
pub fn formatted_search_results<S, F, R>(
    service: &TranslatableSearchService<S>,
    entity: &Arc<EntityType>,
    text: &str,
    limit: usize,
    formatter: F,
    search_fields: Option<&[String]>,
    ctx: &LocaleContext,
) -> Result<OptionMap, StoreError>
where
    S: EntityStore,
    F: Fn(&Record) -> R + Send + Sync + 'static,
    R: Into<Formatted>,
{
    let options = options_for(limit, search_fields).formatter(formatter);
    service.search_results(entity, text, &options, ctx)
}

/// Matching records paired with their display label.
pub fn search_with_translated_labels<S: EntityStore>(
    service: &TranslatableSearchService<S>,
    entity: &Arc<EntityType>,
    text: &str,
    limit: usize,
    search_fields: Option<&[String]>,
    ctx: &LocaleContext,
) -> Result<Vec<(Record, String)>, StoreError> {
    let records = service.search(entity, text, &options_for(limit, search_fields), ctx)?;
    let label_field = service.default_label_field();
    Ok(records
        .into_iter()
        .map(|record| {
            let label = service.translated_label(&record, label_field, None, ctx);
            (record, label)
        })
        .collect())
}

/// Keys of the records matching `text`. `None` for blank text, meaning
/// "do not narrow".
pub fn matching_keys<S: EntityStore>(
    service: &TranslatableSearchService<S>,
    entity: &Arc<EntityType>,
    text: &str,
    search_fields: Option<&[String]>,
    ctx: &LocaleContext,
) -> Result<Option<Vec<EntityKey>>, StoreError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let options = options_for(service.default_limit(), search_fields);
    let records = service.search(entity, text, &options, ctx)?;
    Ok(Some(records.iter().map(|r| r.key().clone()).collect()))
}

/// Narrow `query` to the records matching `text`. Blank text leaves it
/// untouched.
pub fn scope_search<S: EntityStore>(
    service: &TranslatableSearchService<S>,
    query: Query,
    text: &str,
    search_fields: Option<&[String]>,
    ctx: &LocaleContext,
) -> Result<Query, StoreError> {
    if text.trim().is_empty() {
        return Ok(query);
    }
    let entity = query.shared_entity();
    let options = options_for(service.default_limit(), search_fields);
    let records = service.search(&entity, text, &options, ctx)?;
    let keys: Vec<_> = records
        .iter()
        .filter_map(|record| record.attribute(entity.key()).cloned())
        .collect();
    Ok(query.where_in(entity.key(), keys))
}

/// The label of `field` per available locale, skipping empty ones. A field
/// without translations yields `{field: raw value}`.
pub fn all_translations<S, T>(
    service: &TranslatableSearchService<S>,
    record: &T,
    field: &str,
    ctx: &LocaleContext,
) -> Translations
where
    S: EntityStore,
    T: Translatable + ?Sized,
{
    let mut out = Translations::new();
    if !record.is_translatable_field(field) {
        out.insert(field, record.attribute_text(field));
        return out;
    }
    for locale in service.locales().available_locales(ctx) {
        let label = service.translated_label(record, field, Some(&locale), ctx);
        if !label.is_empty() {
            out.insert(locale, label);
        }
    }
    out
}
