use crate::entity::Record;
use crate::locale::LocaleContext;

/// Render-time state a field sees: the request locale plus whatever the
/// host form is bound to.
#[derive(Debug, Clone, Default)]
pub struct FieldContext {
    locale: LocaleContext,
    record: Option<Record>,
    model: Option<String>,
    resource: Option<String>,
}

impl FieldContext {
    pub fn new(locale: LocaleContext) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn for_locale(locale: impl Into<String>) -> Self {
        Self::new(LocaleContext::new(locale))
    }

    /// The record being edited.
    pub fn with_record(mut self, record: Record) -> Self {
        self.record = Some(record);
        self
    }

    /// The entity type name the form is bound to.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Name of the containing resource, e.g. `ProductResource`.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn locale(&self) -> &LocaleContext {
        &self.locale
    }

    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}
