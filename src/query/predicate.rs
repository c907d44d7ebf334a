use serde_json::{Map, Value};

use crate::entity::value_text;

/// One way a record can match the search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMatch {
    /// The `locale` entry of a translation map contains the text.
    /// Always case-folded.
    Translated { field: String, locale: String },
    /// The scalar value of a plain field contains the text.
    Plain { field: String },
}

impl FieldMatch {
    pub fn field(&self) -> &str {
        match self {
            FieldMatch::Translated { field, .. } | FieldMatch::Plain { field } => field,
        }
    }
}

/// OR of substring matches over a set of fields and locales.
///
/// An empty predicate matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    needle: String,
    case_insensitive: bool,
    matches: Vec<FieldMatch>,
}

impl SearchPredicate {
    pub fn new(needle: impl Into<String>, case_insensitive: bool) -> Self {
        Self {
            needle: needle.into(),
            case_insensitive,
            matches: Vec::new(),
        }
    }

    pub fn translated(mut self, field: impl Into<String>, locale: impl Into<String>) -> Self {
        self.push(FieldMatch::Translated {
            field: field.into(),
            locale: locale.into(),
        });
        self
    }

    pub fn plain(mut self, field: impl Into<String>) -> Self {
        self.push(FieldMatch::Plain {
            field: field.into(),
        });
        self
    }

    /// Add a match; exact repeats are ignored.
    pub fn push(&mut self, m: FieldMatch) {
        if !self.matches.contains(&m) {
            self.matches.push(m);
        }
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn matches(&self) -> &[FieldMatch] {
        &self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The `LIKE` pattern bound for this predicate.
    pub fn like_pattern(&self, folded: bool) -> String {
        if folded {
            format!("%{}%", self.needle.to_lowercase())
        } else {
            format!("%{}%", self.needle)
        }
    }

    /// Evaluate against stored attributes.
    pub fn evaluate(&self, attributes: &Map<String, Value>) -> bool {
        self.matches.iter().any(|m| match m {
            FieldMatch::Translated { field, locale } => attributes
                .get(field)
                .and_then(Value::as_object)
                .and_then(|map| map.get(locale))
                .and_then(Value::as_str)
                .is_some_and(|text| contains(text, &self.needle, true)),
            FieldMatch::Plain { field } => {
                let text = value_text(attributes.get(field));
                !text.is_empty() && contains(&text, &self.needle, self.case_insensitive)
            }
        })
    }
}

fn contains(haystack: &str, needle: &str, fold: bool) -> bool {
    if fold {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    } else {
        haystack.contains(needle)
    }
}
