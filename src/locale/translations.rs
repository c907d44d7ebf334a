//! Per-locale value maps as stored in translatable columns.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A locale -> text map that keeps the order entries were stored in.
///
/// Order matters: when neither the preferred, current nor fallback locale has
/// a value, the first filled entry is the one displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    entries: Vec<(String, Option<String>)>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a stored JSON column. Non-object values have no translations.
    /// Scalars other than strings are kept in their text form; nested
    /// structures are treated as missing.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::new();
        };
        let entries = object
            .iter()
            .map(|(locale, value)| {
                let text = match value {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                };
                (locale.clone(), text)
            })
            .collect();
        Self { entries }
    }

    pub fn to_value(&self) -> Value {
        let mut object = serde_json::Map::with_capacity(self.entries.len());
        for (locale, text) in &self.entries {
            let value = match text {
                Some(s) => Value::String(s.clone()),
                None => Value::Null,
            };
            object.insert(locale.clone(), value);
        }
        Value::Object(object)
    }

    /// Set a locale's value. An existing locale keeps its position.
    pub fn insert(&mut self, locale: impl Into<String>, text: impl Into<String>) {
        self.put(locale.into(), Some(text.into()));
    }

    /// Record a locale with an explicit null value.
    pub fn insert_null(&mut self, locale: impl Into<String>) {
        self.put(locale.into(), None);
    }

    fn put(&mut self, locale: String, text: Option<String>) {
        match self.entries.iter_mut().find(|(l, _)| *l == locale) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((locale, text)),
        }
    }

    /// The stored value, if present and not null (may be empty).
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == locale)
            .and_then(|(_, text)| text.as_deref())
    }

    /// True when the locale is present, not null and not the empty string.
    pub fn has_value(&self, locale: &str) -> bool {
        self.get(locale).is_some_and(|text| !text.is_empty())
    }

    /// First locale (in stored order) with a non-empty value.
    pub fn first_filled(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, text)| text.as_deref().is_some_and(|t| !t.is_empty()))
            .map(|(locale, _)| locale.as_str())
    }

    /// Choose the locale to display.
    ///
    /// Order: `preferred` (when given), `current`, `fallback`, then the first
    /// filled entry. Returns `None` when every value is missing or empty.
    pub fn best_locale<'a>(
        &'a self,
        preferred: Option<&'a str>,
        current: &'a str,
        fallback: &'a str,
    ) -> Option<&'a str> {
        preferred
            .into_iter()
            .chain([current, fallback])
            .find(|locale| self.has_value(locale))
            .or_else(|| self.first_filled())
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(locale, _)| locale.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(locale, text)| (locale.as_str(), text.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L, T> FromIterator<(L, T)> for Translations
where
    L: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let mut translations = Translations::new();
        for (locale, text) in iter {
            translations.insert(locale, text);
        }
        translations
    }
}

impl<L, T, const N: usize> From<[(L, T); N]> for Translations
where
    L: Into<String>,
    T: Into<String>,
{
    fn from(entries: [(L, T); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl Serialize for Translations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (locale, text) in &self.entries {
            map.serialize_entry(locale, text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Translations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TranslationsVisitor;

        impl<'de> Visitor<'de> for TranslationsVisitor {
            type Value = Translations;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of locale codes to strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut translations = Translations::new();
                while let Some((locale, text)) = access.next_entry::<String, Option<String>>()? {
                    translations.put(locale, text);
                }
                Ok(translations)
            }
        }

        deserializer.deserialize_map(TranslationsVisitor)
    }
}
