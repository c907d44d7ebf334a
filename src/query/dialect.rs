//! Per-dialect templates for matching inside JSON translation columns.

use std::collections::HashMap;
use std::fmt;

/// Used for any dialect without a template of its own.
pub const GENERIC_JSON_TEMPLATE: &str = "LOWER(CAST({field} AS TEXT)) LIKE ?";

const MYSQL_JSON_TEMPLATE: &str = "LOWER(JSON_UNQUOTE(JSON_EXTRACT({field}, '$.\"{locale}\"'))) LIKE ?";
const PGSQL_JSON_TEMPLATE: &str = "({field}->>'{locale}') ILIKE ?";

/// SQL dialect, identified by the driver name the store reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySql,
    Postgres,
    Sqlite,
    Other(String),
}

impl Dialect {
    pub fn from_driver(driver: &str) -> Self {
        match driver.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Dialect::MySql,
            "pgsql" | "postgres" | "postgresql" => Dialect::Postgres,
            "sqlite" | "sqlite3" => Dialect::Sqlite,
            other => Dialect::Other(other.to_string()),
        }
    }

    /// Lookup key in the extraction table.
    pub fn key(&self) -> &str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Postgres => "pgsql",
            Dialect::Sqlite => "sqlite",
            Dialect::Other(name) => name,
        }
    }

    /// Template for a substring match on a plain column.
    pub fn plain_template(&self, case_insensitive: bool) -> &'static str {
        match (self, case_insensitive) {
            (Dialect::Postgres, true) => "{field} ILIKE ?",
            (_, true) => "LOWER({field}) LIKE ?",
            (_, false) => "{field} LIKE ?",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Dialect key -> JSON extraction template.
///
/// Templates carry `{field}` and `{locale}` placeholders and exactly one `?`
/// for the lower-cased `%text%` pattern. Built-ins cover MySQL and Postgres;
/// anything else falls back to [`GENERIC_JSON_TEMPLATE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonExtraction {
    templates: HashMap<String, String>,
}

impl Default for JsonExtraction {
    fn default() -> Self {
        Self::builtin()
    }
}

impl JsonExtraction {
    pub fn builtin() -> Self {
        let templates = [("mysql", MYSQL_JSON_TEMPLATE), ("pgsql", PGSQL_JSON_TEMPLATE)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { templates }
    }

    /// Built-ins overlaid with configured templates.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (dialect, template) in overrides {
            self.templates.insert(dialect.to_ascii_lowercase(), template.clone());
        }
        self
    }

    pub fn set(&mut self, dialect: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(dialect.into(), template.into());
    }

    pub fn template_for(&self, dialect: &Dialect) -> &str {
        self.templates
            .get(dialect.key())
            .map(String::as_str)
            .unwrap_or(GENERIC_JSON_TEMPLATE)
    }

    /// Fill a template's placeholders.
    pub fn render(template: &str, field: &str, locale: &str) -> String {
        template.replace("{field}", field).replace("{locale}", locale)
    }
}
