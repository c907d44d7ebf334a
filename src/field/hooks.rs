//! Host-side extension points a select field plugs into.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::FieldContext;
use crate::entity::EntityKey;
use crate::error::SelectError;
use crate::options::OptionMap;

pub type SearchResultsHook =
    Box<dyn Fn(&str, &FieldContext) -> Result<OptionMap, SelectError> + Send + Sync>;
pub type OptionLabelHook =
    Box<dyn Fn(Option<&EntityKey>, &FieldContext) -> Result<Option<String>, SelectError> + Send + Sync>;
pub type OptionLabelsHook =
    Box<dyn Fn(&[EntityKey], &FieldContext) -> Result<OptionMap, SelectError> + Send + Sync>;
pub type OptionsHook = Box<dyn Fn(&FieldContext) -> Result<OptionMap, SelectError> + Send + Sync>;

/// The four callbacks a host form framework accepts from a select field.
pub trait FieldHost {
    fn get_search_results_using(&mut self, hook: SearchResultsHook);
    fn get_option_label_using(&mut self, hook: OptionLabelHook);
    fn get_option_labels_using(&mut self, hook: OptionLabelsHook);
    fn options(&mut self, hook: OptionsHook);
}

/// Built-in host: stores the callbacks and invokes them on demand.
/// Unregistered callbacks answer with nothing.
pub struct SelectHooks {
    name: String,
    search_results: Option<SearchResultsHook>,
    option_label: Option<OptionLabelHook>,
    option_labels: Option<OptionLabelsHook>,
    options: Option<OptionsHook>,
}

impl SelectHooks {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            search_results: None,
            option_label: None,
            option_labels: None,
            options: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn search_results(&self, text: &str, ctx: &FieldContext) -> Result<OptionMap, SelectError> {
        match &self.search_results {
            Some(hook) => hook(text, ctx),
            None => Ok(OptionMap::new()),
        }
    }

    pub fn option_label(
        &self,
        value: Option<&EntityKey>,
        ctx: &FieldContext,
    ) -> Result<Option<String>, SelectError> {
        match &self.option_label {
            Some(hook) => hook(value, ctx),
            None => Ok(None),
        }
    }

    pub fn option_labels(&self, values: &[EntityKey], ctx: &FieldContext) -> Result<OptionMap, SelectError> {
        match &self.option_labels {
            Some(hook) => hook(values, ctx),
            None => Ok(OptionMap::new()),
        }
    }

    pub fn list_options(&self, ctx: &FieldContext) -> Result<OptionMap, SelectError> {
        match &self.options {
            Some(hook) => hook(ctx),
            None => Ok(OptionMap::new()),
        }
    }
}

impl FieldHost for SelectHooks {
    fn get_search_results_using(&mut self, hook: SearchResultsHook) {
        self.search_results = Some(hook);
    }

    fn get_option_label_using(&mut self, hook: OptionLabelHook) {
        self.option_label = Some(hook);
    }

    fn get_option_labels_using(&mut self, hook: OptionLabelsHook) {
        self.option_labels = Some(hook);
    }

    fn options(&mut self, hook: OptionsHook) {
        self.options = Some(hook);
    }
}

/// Named fields, e.g. for serving them over HTTP.
#[derive(Default)]
pub struct HookRegistry {
    fields: BTreeMap<String, Arc<SelectHooks>>,
    default_locale: Option<String>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locale used when a request names none. Defaults to `en`.
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    pub fn default_locale(&self) -> &str {
        self.default_locale
            .as_deref()
            .unwrap_or(crate::locale::DEFAULT_LOCALE)
    }

    /// Add a field under its own name, replacing any previous one.
    pub fn insert(&mut self, hooks: SelectHooks) {
        self.fields.insert(hooks.name().to_string(), Arc::new(hooks));
    }

    pub fn with(mut self, hooks: SelectHooks) -> Self {
        self.insert(hooks);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<SelectHooks>> {
        self.fields.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}
