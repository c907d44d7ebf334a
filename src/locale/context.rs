use super::DEFAULT_LOCALE;

/// Per-request locale state owned by the host application.
///
/// The host sets the active locale once per request and threads the context
/// through every lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleContext {
    locale: String,
}

impl LocaleContext {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    /// The active locale for this request.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }
}

impl Default for LocaleContext {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}
