use std::error::Error;

/// Error type plugin sources may return. The resolver only logs it.
pub type PluginSourceError = Box<dyn Error + Send + Sync>;

/// An external plugin registry that may publish a default locale list
/// (for example the admin panel's translatable plugin).
///
/// Lookups are best-effort: `Ok(None)` means the plugin is not installed or
/// has no list configured, and errors are swallowed by the resolver.
pub trait PluginLocaleSource: Send + Sync {
    fn default_locales(&self) -> Result<Option<Vec<String>>, PluginSourceError>;
}

/// A plugin source with a fixed list, for hosts that configure the plugin in
/// code.
#[derive(Debug, Clone, Default)]
pub struct StaticPluginLocales {
    locales: Vec<String>,
}

impl StaticPluginLocales {
    pub fn new<I, L>(locales: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
        }
    }
}

impl PluginLocaleSource for StaticPluginLocales {
    fn default_locales(&self) -> Result<Option<Vec<String>>, PluginSourceError> {
        if self.locales.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.locales.clone()))
    }
}
