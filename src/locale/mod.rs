//! Locale handling - which locales exist, which one is active, and which
//! translation to show.
//!
//! The active locale is never read from ambient state. Callers pass a
//! [`LocaleContext`] into every operation that needs it, so the resolver can
//! be exercised without any host application around it.

mod cache;
mod context;
mod resolver;
mod source;
mod translations;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use cache::LocaleCache;
pub use context::LocaleContext;
pub use resolver::LocaleResolver;
pub use source::{PluginLocaleSource, PluginSourceError, StaticPluginLocales};
pub use translations::Translations;

/// Last-resort locale. Resolution never returns an empty list; when every
/// source comes up empty the result is `[DEFAULT_LOCALE]`.
pub const DEFAULT_LOCALE: &str = "en";

/// Where the list of available locales comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleStrategy {
    /// Plugin registry first, then configuration keys, then the default.
    #[default]
    Auto,
    /// Only the plugin registry.
    Filament,
    /// Only configuration keys.
    Config,
    /// The fixed `manual_locales` list.
    Manual,
}

impl LocaleStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocaleStrategy::Auto => "auto",
            LocaleStrategy::Filament => "filament",
            LocaleStrategy::Config => "config",
            LocaleStrategy::Manual => "manual",
        }
    }
}

impl fmt::Display for LocaleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocaleStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(LocaleStrategy::Auto),
            "filament" => Ok(LocaleStrategy::Filament),
            "config" => Ok(LocaleStrategy::Config),
            "manual" => Ok(LocaleStrategy::Manual),
            _ => Err(ConfigError::InvalidStrategy(s.to_string())),
        }
    }
}

/// Drop empty codes and repeats, keeping first-seen order.
pub fn dedup_locales<I, L>(locales: I) -> Vec<String>
where
    I: IntoIterator<Item = L>,
    L: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for locale in locales {
        let locale = locale.into();
        if locale.is_empty() || out.contains(&locale) {
            continue;
        }
        out.push(locale);
    }
    out
}
