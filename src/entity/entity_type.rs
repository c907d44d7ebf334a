use crate::error::ConfigError;

/// A named relationship from one entity type to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub name: String,
    pub target: String,
}

/// Runtime description of an entity type: where it lives, how it is keyed,
/// and which of its fields hold translation maps.
///
/// `translatable == None` means the type does not have the translation
/// capability at all; `Some(vec![])` means it has the capability but declares
/// no fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
    name: String,
    table: String,
    key_field: String,
    translatable: Option<Vec<String>>,
    locales: Option<Vec<String>>,
    search_fields: Vec<String>,
    relations: Vec<Relation>,
}

impl EntityType {
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            key_field: "id".into(),
            translatable: None,
            locales: None,
            search_fields: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = field.into();
        self
    }

    /// Mark the type translatable and declare its translatable fields.
    pub fn translatable<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.translatable = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Entity-level locale override, preferred over the application list.
    pub fn locales<I, L>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.locales = Some(locales.into_iter().map(Into::into).collect());
        self
    }

    /// Plain (non-translatable) fields searched by default alongside the
    /// translatable ones.
    pub fn search_fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn relation(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.relations.push(Relation {
            name: name.into(),
            target: target.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn key(&self) -> &str {
        &self.key_field
    }

    pub fn is_translatable(&self) -> bool {
        self.translatable.is_some()
    }

    /// Declared translatable fields; empty for non-translatable types.
    pub fn translatable_attributes(&self) -> &[String] {
        self.translatable.as_deref().unwrap_or(&[])
    }

    pub fn is_translatable_field(&self, field: &str) -> bool {
        self.translatable_attributes().iter().any(|f| f == field)
    }

    pub fn declared_locales(&self) -> Option<&[String]> {
        self.locales.as_deref()
    }

    pub fn non_translatable_search_fields(&self) -> &[String] {
        &self.search_fields
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Target type name of a relationship, if declared.
    pub fn related(&self, relation: &str) -> Option<&str> {
        self.relations
            .iter()
            .find(|r| r.name == relation)
            .map(|r| r.target.as_str())
    }

    /// Setup-time check that the descriptor can back a store query.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidEntityType {
            entity: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.table.is_empty() {
            return Err(invalid("table is empty"));
        }
        if self.key_field.is_empty() {
            return Err(invalid("key field is empty"));
        }
        Ok(())
    }
}
