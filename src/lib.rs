mod config;
mod entity;
mod error;
mod options;
mod services;

pub mod field;
pub mod locale;
pub mod query;
pub mod search;
pub mod store;

#[cfg(feature = "http")]
pub mod http;

pub use config::{
    ComponentDefaults, ConfigStore, DatabaseConfig, JsonConfigStore, SelectConfig, STRATEGY_ENV,
};
pub use entity::{
    value_text, EntityKey, EntityRegistry, EntityType, Model, Record, Relation, Translatable,
};
pub use error::{ConfigError, SelectError, StoreError};
pub use field::{FieldContext, FieldHost, HookRegistry, SelectHooks, TranslatableSelect};
pub use locale::{
    LocaleCache, LocaleContext, LocaleResolver, LocaleStrategy, PluginLocaleSource,
    PluginSourceError, StaticPluginLocales, Translations, DEFAULT_LOCALE,
};
pub use options::OptionMap;
pub use query::{modifier, Query, QueryModifier, SearchPredicate, SqlRenderer, SqlStatement};
pub use search::{Formatted, Formatter, SearchOptions, TranslatableSearchService};
pub use services::SelectServices;
pub use store::{EntityStore, InMemoryEntityStore};

// Derive macro for `Model`
pub use translatable_select_macros::Model;
