//! Render a [`Query`] into parameterised SQL.
//!
//! Field and locale names are spliced into the statement, so both are checked
//! against a conservative identifier alphabet first. The search text only
//! ever travels as a binding.

use serde_json::Value;

use super::{Condition, Dialect, FieldMatch, JsonExtraction, Query, SearchPredicate};
use crate::config::DatabaseConfig;
use crate::error::ConfigError;

/// SQL text with `?` placeholders and their bindings, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub bindings: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct SqlRenderer {
    dialect: Dialect,
    extraction: JsonExtraction,
}

impl SqlRenderer {
    pub fn new(dialect: Dialect, extraction: JsonExtraction) -> Self {
        Self {
            dialect,
            extraction,
        }
    }

    /// Renderer for a driver name using the configured template table.
    pub fn for_driver(driver: &str, config: &DatabaseConfig) -> Self {
        Self::new(
            Dialect::from_driver(driver),
            JsonExtraction::builtin().with_overrides(&config.json_extraction),
        )
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// The OR-group for a search predicate, parenthesised.
    pub fn render_predicate(&self, predicate: &SearchPredicate) -> Result<SqlStatement, ConfigError> {
        if predicate.is_empty() {
            return Ok(SqlStatement {
                sql: "1 = 0".into(),
                bindings: Vec::new(),
            });
        }

        let mut clauses = Vec::with_capacity(predicate.matches().len());
        let mut bindings = Vec::with_capacity(predicate.matches().len());
        for m in predicate.matches() {
            match m {
                FieldMatch::Translated { field, locale } => {
                    check_identifier(field)?;
                    check_locale(locale)?;
                    let template = self.extraction.template_for(&self.dialect);
                    clauses.push(JsonExtraction::render(template, field, locale));
                    bindings.push(Value::String(predicate.like_pattern(true)));
                }
                FieldMatch::Plain { field } => {
                    check_identifier(field)?;
                    let folded = predicate.is_case_insensitive();
                    let template = self.dialect.plain_template(folded);
                    clauses.push(template.replace("{field}", field));
                    bindings.push(Value::String(predicate.like_pattern(folded)));
                }
            }
        }

        Ok(SqlStatement {
            sql: format!("({})", clauses.join(" OR ")),
            bindings,
        })
    }

    /// A complete `SELECT` for the query.
    pub fn render_select(&self, query: &Query) -> Result<SqlStatement, ConfigError> {
        let table = query.entity().table();
        check_identifier(table)?;

        let mut wheres = Vec::new();
        let mut bindings = Vec::new();
        for condition in query.conditions() {
            check_identifier(condition.field())?;
            match condition {
                Condition::Eq(field, value) => {
                    wheres.push(format!("{} = ?", field));
                    bindings.push(value.clone());
                }
                Condition::In(_, values) if values.is_empty() => wheres.push("1 = 0".to_string()),
                Condition::In(field, values) => {
                    let marks = vec!["?"; values.len()].join(", ");
                    wheres.push(format!("{} IN ({})", field, marks));
                    bindings.extend(values.iter().cloned());
                }
                Condition::NotNull(field) => wheres.push(format!("{} IS NOT NULL", field)),
            }
        }
        if let Some(predicate) = query.search() {
            let rendered = self.render_predicate(predicate)?;
            wheres.push(rendered.sql);
            bindings.extend(rendered.bindings);
        }

        let mut sql = format!("SELECT * FROM {}", table);
        if !wheres.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&wheres.join(" AND "));
        }
        if let Some(limit) = query.limit_value() {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(SqlStatement { sql, bindings })
    }
}

fn check_identifier(ident: &str) -> Result<(), ConfigError> {
    let valid = !ident.is_empty()
        && ident
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        && !ident.starts_with(|c: char| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier(ident.to_string()))
    }
}

fn check_locale(locale: &str) -> Result<(), ConfigError> {
    let valid = !locale.is_empty()
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier(locale.to_string()))
    }
}
