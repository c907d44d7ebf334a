//! Configuration: the package settings and the host's key-value store.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::locale::LocaleStrategy;

/// Environment variable overriding [`SelectConfig::locale_strategy`].
pub const STRATEGY_ENV: &str = "TRANSLATABLE_SEARCH_LOCALE_STRATEGY";

/// Package settings. Every field has a default, so partial documents load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Maximum results per search unless overridden per call.
    pub default_limit: usize,
    pub locale_strategy: LocaleStrategy,
    /// Used by the `manual` strategy.
    pub manual_locales: Vec<String>,
    /// Host configuration keys scanned, in order, by the `config` strategy.
    pub config_keys: Vec<String>,
    pub cache_locales: bool,
    /// Host configuration key holding the fallback locale.
    pub fallback_locale_key: String,
    pub database: DatabaseConfig,
    pub component_defaults: ComponentDefaults,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            locale_strategy: LocaleStrategy::Auto,
            manual_locales: vec!["en".into(), "ckb".into(), "ar".into()],
            config_keys: vec![
                "app.supported_locales".into(),
                "app.locales".into(),
                "translatable.locales".into(),
                "filament-spatie-translatable.default_locales".into(),
            ],
            cache_locales: true,
            fallback_locale_key: "app.fallback_locale".into(),
            database: DatabaseConfig::default(),
            component_defaults: ComponentDefaults::default(),
        }
    }
}

impl SelectConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(STRATEGY_ENV).filter(|v| !v.trim().is_empty()) {
            self.locale_strategy = raw.parse()?;
        }
        Ok(self)
    }
}

/// Settings that shape generated queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Case-insensitive matching for non-translatable fields.
    pub case_insensitive: bool,
    /// Dialect name -> JSON extraction template with `{field}` and `{locale}`
    /// placeholders and one `?` binding for the pattern.
    pub json_extraction: HashMap<String, String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let json_extraction = [
            (
                "sqlite",
                "LOWER(json_extract(`{field}`, '$.\"{locale}\"')) LIKE ?",
            ),
            (
                "mysql",
                "LOWER(JSON_UNQUOTE(JSON_EXTRACT(`{field}`, '$.\"{locale}\"'))) LIKE ?",
            ),
            ("pgsql", "LOWER(({field}->>'{locale}')) LIKE ?"),
        ]
        .into_iter()
        .map(|(dialect, template)| (dialect.to_string(), template.to_string()))
        .collect();

        Self {
            case_insensitive: true,
            json_extraction,
        }
    }
}

/// Defaults applied to newly created select fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentDefaults {
    pub label_field: String,
    pub search_limit: usize,
    pub searchable: bool,
}

impl Default for ComponentDefaults {
    fn default() -> Self {
        Self {
            label_field: "name".into(),
            search_limit: 50,
            searchable: true,
        }
    }
}

/// The host application's configuration store.
///
/// Keys are dotted paths (`app.supported_locales`). `Ok(None)` means the key
/// is not set.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, ConfigError>;
}

/// A [`ConfigStore`] over an in-memory JSON document.
#[derive(Debug, Default)]
pub struct JsonConfigStore {
    root: RwLock<Value>,
}

impl JsonConfigStore {
    pub fn new(root: Value) -> Self {
        Self {
            root: RwLock::new(root),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(serde_json::from_str(s)?))
    }

    /// Set a dotted key, creating intermediate objects as needed.
    pub fn set(&self, key: &str, value: Value) -> Result<(), ConfigError> {
        let mut root = self
            .root
            .write()
            .map_err(|_| ConfigError::Unreadable("config lock poisoned".into()))?;

        let mut node = &mut *root;
        for segment in key.split('.') {
            if !node.is_object() {
                *node = Value::Object(serde_json::Map::new());
            }
            node = match node.as_object_mut() {
                Some(map) => map.entry(segment.to_string()).or_insert(Value::Null),
                None => {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("{} is not an object", segment),
                    })
                }
            };
        }
        *node = value;
        Ok(())
    }
}

impl ConfigStore for JsonConfigStore {
    fn get(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        let root = self
            .root
            .read()
            .map_err(|_| ConfigError::Unreadable("config lock poisoned".into()))?;

        let mut node = &*root;
        for segment in key.split('.') {
            match node.get(segment) {
                Some(next) => node = next,
                None => return Ok(None),
            }
        }
        if node.is_null() {
            return Ok(None);
        }
        Ok(Some(node.clone()))
    }
}

/// Interpret a configuration value as a non-empty list of locale codes.
pub(crate) fn locale_list(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    let locales: Vec<String> = items
        .iter()
        .filter_map(|item| item.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if locales.is_empty() {
        None
    } else {
        Some(locales)
    }
}
