use std::fmt;
use std::sync::Arc;

use crate::entity::Record;
use crate::options::OptionMap;
use crate::query::QueryModifier;

/// What a caller-supplied formatter produced for one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Formatted {
    /// A bare label, keyed by the record's own key.
    Label(String),
    /// Complete key/label entries merged into the result as-is.
    Entries(OptionMap),
}

impl From<String> for Formatted {
    fn from(label: String) -> Self {
        Formatted::Label(label)
    }
}

impl From<&str> for Formatted {
    fn from(label: &str) -> Self {
        Formatted::Label(label.to_string())
    }
}

impl From<OptionMap> for Formatted {
    fn from(entries: OptionMap) -> Self {
        Formatted::Entries(entries)
    }
}

pub type Formatter = Arc<dyn Fn(&Record) -> Formatted + Send + Sync>;

/// Per-call search configuration.
///
/// Unset values fall back to the service defaults: search fields are
/// detected from the entity type, locales come from the resolver, and the
/// label field and limit come from configuration.
#[derive(Clone, Default)]
pub struct SearchOptions {
    search_fields: Vec<String>,
    label_field: Option<String>,
    search_locales: Option<Vec<String>>,
    limit: Option<usize>,
    query_modifier: Option<QueryModifier>,
    formatter: Option<Formatter>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn label_field(mut self, field: impl Into<String>) -> Self {
        self.label_field = Some(field.into());
        self
    }

    /// Restrict the searched locales. An empty list means "resolve them".
    pub fn search_locales<I, L>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let locales: Vec<String> = locales.into_iter().map(Into::into).collect();
        self.search_locales = if locales.is_empty() { None } else { Some(locales) };
        self
    }

    /// Set the locale override verbatim: `Some(vec![])` searches no locale.
    pub fn exact_locales(mut self, locales: Option<Vec<String>>) -> Self {
        self.search_locales = locales;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn query_modifier(mut self, modifier: QueryModifier) -> Self {
        self.query_modifier = Some(modifier);
        self
    }

    pub fn maybe_query_modifier(mut self, modifier: Option<QueryModifier>) -> Self {
        self.query_modifier = modifier;
        self
    }

    pub fn formatter<F, R>(mut self, formatter: F) -> Self
    where
        F: Fn(&Record) -> R + Send + Sync + 'static,
        R: Into<Formatted>,
    {
        self.formatter = Some(Arc::new(move |record| formatter(record).into()));
        self
    }

    pub fn fields(&self) -> &[String] {
        &self.search_fields
    }

    pub fn label(&self) -> Option<&str> {
        self.label_field.as_deref()
    }

    pub fn locales(&self) -> Option<&[String]> {
        self.search_locales.as_deref()
    }

    pub fn limit_value(&self) -> Option<usize> {
        self.limit
    }

    pub fn modifier(&self) -> Option<&QueryModifier> {
        self.query_modifier.as_ref()
    }

    pub fn format(&self) -> Option<&Formatter> {
        self.formatter.as_ref()
    }
}

impl fmt::Debug for SearchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOptions")
            .field("search_fields", &self.search_fields)
            .field("label_field", &self.label_field)
            .field("search_locales", &self.search_locales)
            .field("limit", &self.limit)
            .field("query_modifier", &self.query_modifier.is_some())
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}
