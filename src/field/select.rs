//! TranslatableSelect - a select field searching across every locale.

use std::fmt;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{FieldContext, FieldHost, SelectHooks};
use crate::config::ComponentDefaults;
use crate::entity::{short_name, EntityKey, EntityRegistry, EntityType};
use crate::error::{ConfigError, SelectError};
use crate::options::OptionMap;
use crate::query::QueryModifier;
use crate::search::{SearchOptions, TranslatableSearchService};
use crate::store::EntityStore;

const RESOURCE_SUFFIX: &str = "Resource";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Binding {
    Unbound,
    Model(String),
    Relationship(String),
}

/// Configuration and behaviour of one select field instance.
///
/// Bound either to an entity type up front ([`for_model`](Self::for_model))
/// or to a relationship whose target type is worked out at render time.
/// Once a type is known it is cached for the life of the field. When no type
/// can be found every hook answers with nothing rather than failing.
pub struct TranslatableSelect<S> {
    name: String,
    search: Arc<TranslatableSearchService<S>>,
    registry: Arc<EntityRegistry>,
    binding: Binding,
    resolved: RwLock<Option<Arc<EntityType>>>,

    label_field: String,
    searchable_fields: Vec<String>,
    search_locales: Option<Vec<String>>,
    fallback_locale: Option<String>,
    query_modifier: Option<QueryModifier>,
    search_limit: usize,

    preload: bool,
    multiple: bool,
    searchable: bool,
    required: bool,
    disabled: bool,
    search_debounce: u64,
    search_prompt: Option<String>,
    searching_message: Option<String>,
    no_search_results_message: Option<String>,
    placeholder: Option<String>,
    helper_text: Option<String>,
    label: Option<String>,
}

impl<S: EntityStore> TranslatableSelect<S> {
    /// An unbound field using the service's defaults.
    pub fn make(
        name: impl Into<String>,
        search: Arc<TranslatableSearchService<S>>,
        registry: Arc<EntityRegistry>,
    ) -> Self {
        let label_field = search.default_label_field().to_string();
        let search_limit = search.default_limit();
        Self {
            name: name.into(),
            search,
            registry,
            binding: Binding::Unbound,
            resolved: RwLock::new(None),
            label_field,
            searchable_fields: Vec::new(),
            search_locales: None,
            fallback_locale: None,
            query_modifier: None,
            search_limit,
            preload: false,
            multiple: false,
            searchable: true,
            required: false,
            disabled: false,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE_MS,
            search_prompt: None,
            searching_message: None,
            no_search_results_message: None,
            placeholder: None,
            helper_text: None,
            label: None,
        }
    }

    /// A field bound to a named entity type. Unknown names fail here.
    pub fn for_model(
        name: impl Into<String>,
        model: &str,
        label_field: &str,
        modifier: Option<QueryModifier>,
        search: Arc<TranslatableSearchService<S>>,
        registry: Arc<EntityRegistry>,
    ) -> Result<Self, ConfigError> {
        let mut field = Self::make(name, search, registry).model(model)?;
        field.label_field = label_field.to_string();
        field.query_modifier = modifier;
        Ok(field)
    }

    /// Bind to an entity type by name, resolving it now.
    pub fn model(mut self, model: &str) -> Result<Self, ConfigError> {
        let entity = self.registry.resolve(model)?;
        self.binding = Binding::Model(entity.name().to_string());
        self.resolved = RwLock::new(Some(entity));
        Ok(self)
    }

    /// Bind to a relationship of the form's record. The target type is
    /// resolved lazily from the render context.
    pub fn relationship(
        mut self,
        name: impl Into<String>,
        title_attribute: Option<&str>,
        modifier: Option<QueryModifier>,
    ) -> Self {
        self.binding = Binding::Relationship(name.into());
        self.resolved = RwLock::new(None);
        if let Some(title) = title_attribute {
            self.label_field = title.to_string();
        }
        if modifier.is_some() {
            self.query_modifier = modifier;
        }
        self
    }

    /// Apply configured component defaults.
    pub fn apply_defaults(mut self, defaults: &ComponentDefaults) -> Self {
        self.label_field = defaults.label_field.clone();
        self.search_limit = defaults.search_limit;
        self.searchable = defaults.searchable;
        self
    }

    pub fn label_field(mut self, field: impl Into<String>) -> Self {
        self.label_field = field.into();
        self
    }

    /// Fields to search instead of the detected ones.
    pub fn searchable_fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.searchable_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Locales to search instead of the resolved ones. Taken verbatim, so
    /// an empty list searches no locale.
    pub fn search_locales<I, L>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.search_locales = Some(locales.into_iter().map(Into::into).collect());
        self
    }

    /// Locale tried first when displaying labels.
    pub fn fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = Some(locale.into());
        self
    }

    pub fn modify_query_using(mut self, modifier: Option<QueryModifier>) -> Self {
        self.query_modifier = modifier;
        self
    }

    pub fn search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn preload(mut self, preload: bool) -> Self {
        self.preload = preload;
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Milliseconds to wait after typing before searching.
    pub fn search_debounce(mut self, millis: u64) -> Self {
        self.search_debounce = millis;
        self
    }

    pub fn search_prompt(mut self, message: impl Into<String>) -> Self {
        self.search_prompt = Some(message.into());
        self
    }

    pub fn searching_message(mut self, message: impl Into<String>) -> Self {
        self.searching_message = Some(message.into());
        self
    }

    pub fn no_search_results_message(mut self, message: impl Into<String>) -> Self {
        self.no_search_results_message = Some(message.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the bound entity type, when known.
    pub fn model_name(&self) -> Option<String> {
        match &self.binding {
            Binding::Model(name) => Some(name.clone()),
            _ => self.cached_entity_type().map(|e| e.name().to_string()),
        }
    }

    pub fn relationship_name(&self) -> Option<&str> {
        match &self.binding {
            Binding::Relationship(name) => Some(name),
            _ => None,
        }
    }

    pub fn get_label_field(&self) -> &str {
        &self.label_field
    }

    pub fn get_searchable_fields(&self) -> &[String] {
        &self.searchable_fields
    }

    pub fn get_search_locales(&self) -> Option<&[String]> {
        self.search_locales.as_deref()
    }

    pub fn get_fallback_locale(&self) -> Option<&str> {
        self.fallback_locale.as_deref()
    }

    pub fn get_search_limit(&self) -> usize {
        self.search_limit
    }

    pub fn get_search_debounce(&self) -> u64 {
        self.search_debounce
    }

    pub fn get_search_prompt(&self) -> Option<&str> {
        self.search_prompt.as_deref()
    }

    pub fn get_searching_message(&self) -> Option<&str> {
        self.searching_message.as_deref()
    }

    pub fn get_no_search_results_message(&self) -> Option<&str> {
        self.no_search_results_message.as_deref()
    }

    pub fn get_placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn get_helper_text(&self) -> Option<&str> {
        self.helper_text.as_deref()
    }

    pub fn get_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn has_query_modifier(&self) -> bool {
        self.query_modifier.is_some()
    }

    pub fn is_preloaded(&self) -> bool {
        self.preload
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn cached_entity_type(&self) -> Option<Arc<EntityType>> {
        self.resolved.read().ok().and_then(|slot| slot.clone())
    }

    /// The target entity type, resolving a relationship binding on first
    /// success: the bound record, then the context's model, then the
    /// `<Model>Resource` naming convention.
    pub fn entity_type(&self, ctx: &FieldContext) -> Option<Arc<EntityType>> {
        if let Some(entity) = self.cached_entity_type() {
            return Some(entity);
        }
        let Binding::Relationship(relation) = &self.binding else {
            return None;
        };

        let resolved = self
            .via_record(relation, ctx)
            .or_else(|| self.via_model(relation, ctx))
            .or_else(|| self.via_resource(relation, ctx));

        match &resolved {
            Some(entity) => {
                debug!(field = %self.name, relation = %relation, entity = entity.name(), "resolved entity type");
                if let Ok(mut slot) = self.resolved.write() {
                    *slot = Some(entity.clone());
                }
            }
            None => debug!(field = %self.name, relation = %relation, "entity type unresolved"),
        }
        resolved
    }

    fn related_of(&self, owner: &EntityType, relation: &str) -> Option<Arc<EntityType>> {
        owner.related(relation).and_then(|target| self.registry.get(target))
    }

    fn via_record(&self, relation: &str, ctx: &FieldContext) -> Option<Arc<EntityType>> {
        let record = ctx.record()?;
        self.related_of(record.entity_type(), relation)
    }

    fn via_model(&self, relation: &str, ctx: &FieldContext) -> Option<Arc<EntityType>> {
        let owner = self.registry.get(ctx.model()?)?;
        self.related_of(&owner, relation)
    }

    fn via_resource(&self, relation: &str, ctx: &FieldContext) -> Option<Arc<EntityType>> {
        let resource = short_name(ctx.resource()?);
        let owner_name = resource.strip_suffix(RESOURCE_SUFFIX).filter(|n| !n.is_empty())?;
        let owner = self.registry.get(owner_name)?;
        self.related_of(&owner, relation)
    }

    fn search_options(&self) -> SearchOptions {
        SearchOptions::new()
            .search_fields(self.searchable_fields.iter().cloned())
            .label_field(self.label_field.as_str())
            .exact_locales(self.search_locales.clone())
            .limit(self.search_limit)
            .maybe_query_modifier(self.query_modifier.clone())
    }

    /// Search hook: `text -> {key: label}`.
    pub fn search_results(&self, text: &str, ctx: &FieldContext) -> Result<OptionMap, SelectError> {
        let Some(entity) = self.entity_type(ctx) else {
            return Ok(OptionMap::new());
        };
        Ok(self
            .search
            .search_results(&entity, text, &self.search_options(), ctx.locale())?)
    }

    /// Single label hook. `None` for no value, no type, or no record.
    pub fn option_label(
        &self,
        value: Option<&EntityKey>,
        ctx: &FieldContext,
    ) -> Result<Option<String>, SelectError> {
        let Some(value) = value else {
            return Ok(None);
        };
        let Some(entity) = self.entity_type(ctx) else {
            return Ok(None);
        };
        Ok(self.search.label_for_key(
            &entity,
            value,
            &self.label_field,
            self.fallback_locale.as_deref(),
            ctx.locale(),
        )?)
    }

    /// Bulk label hook for already-selected values.
    pub fn option_labels(&self, values: &[EntityKey], ctx: &FieldContext) -> Result<OptionMap, SelectError> {
        if values.is_empty() {
            return Ok(OptionMap::new());
        }
        let Some(entity) = self.entity_type(ctx) else {
            return Ok(OptionMap::new());
        };
        Ok(self.search.labels_for_keys(
            &entity,
            values,
            &self.label_field,
            self.fallback_locale.as_deref(),
            ctx.locale(),
        )?)
    }

    /// Options hook. Empty unless preloading is on.
    pub fn options(&self, ctx: &FieldContext) -> Result<OptionMap, SelectError> {
        if !self.preload {
            return Ok(OptionMap::new());
        }
        let Some(entity) = self.entity_type(ctx) else {
            return Ok(OptionMap::new());
        };
        Ok(self.search.preload_options(
            &entity,
            &self.label_field,
            self.query_modifier.as_ref(),
            self.search_limit,
            ctx.locale(),
        )?)
    }
}

impl<S: EntityStore + 'static> TranslatableSelect<S> {
    /// Register the four hooks on a host.
    pub fn attach<H: FieldHost + ?Sized>(self: Arc<Self>, host: &mut H) {
        let field = self.clone();
        host.get_search_results_using(Box::new(move |text, ctx| field.search_results(text, ctx)));
        let field = self.clone();
        host.get_option_label_using(Box::new(move |value, ctx| field.option_label(value, ctx)));
        let field = self.clone();
        host.get_option_labels_using(Box::new(move |values, ctx| field.option_labels(values, ctx)));
        let field = self;
        host.options(Box::new(move |ctx| field.options(ctx)));
    }

    /// The field's hooks on the built-in host.
    pub fn into_hooks(self) -> SelectHooks {
        let mut hooks = SelectHooks::new(self.name.clone());
        Arc::new(self).attach(&mut hooks);
        hooks
    }
}

impl<S> fmt::Debug for TranslatableSelect<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatableSelect")
            .field("name", &self.name)
            .field("binding", &self.binding)
            .field("label_field", &self.label_field)
            .field("searchable_fields", &self.searchable_fields)
            .field("search_locales", &self.search_locales)
            .field("fallback_locale", &self.fallback_locale)
            .field("search_limit", &self.search_limit)
            .field("preload", &self.preload)
            .field("multiple", &self.multiple)
            .finish_non_exhaustive()
    }
}
