//! Store-neutral query model.
//!
//! A [`Query`] is what the search service hands to an
//! [`EntityStore`](crate::EntityStore): caller constraints (from a query
//! modifier), an optional OR-ed search predicate, and a limit. Stores either
//! evaluate it directly or render it with [`SqlRenderer`].

mod dialect;
mod predicate;
mod sql;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::entity::EntityType;

pub use dialect::{Dialect, JsonExtraction, GENERIC_JSON_TEMPLATE};
pub use predicate::{FieldMatch, SearchPredicate};
pub use sql::{SqlRenderer, SqlStatement};

/// Caller hook that narrows a query before the search predicate is attached.
pub type QueryModifier = Arc<dyn Fn(Query) -> Query + Send + Sync>;

/// Wrap a closure as a [`QueryModifier`].
pub fn modifier<F>(f: F) -> QueryModifier
where
    F: Fn(Query) -> Query + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A constraint added by a query modifier. All constraints must hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(String, Value),
    In(String, Vec<Value>),
    NotNull(String),
}

impl Condition {
    pub fn field(&self) -> &str {
        match self {
            Condition::Eq(field, _) | Condition::In(field, _) | Condition::NotNull(field) => field,
        }
    }

    pub fn evaluate(&self, attributes: &Map<String, Value>) -> bool {
        match self {
            Condition::Eq(field, expected) => attributes.get(field) == Some(expected),
            Condition::In(field, values) => attributes
                .get(field)
                .is_some_and(|value| values.contains(value)),
            Condition::NotNull(field) => attributes.get(field).is_some_and(|v| !v.is_null()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Query {
    entity: Arc<EntityType>,
    conditions: Vec<Condition>,
    search: Option<SearchPredicate>,
    limit: Option<usize>,
}

impl Query {
    pub fn new(entity: Arc<EntityType>) -> Self {
        Self {
            entity,
            conditions: Vec::new(),
            search: None,
            limit: None,
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq(field.into(), value.into()));
        self
    }

    pub fn where_in<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.conditions.push(Condition::In(field.into(), values));
        self
    }

    pub fn where_not_null(mut self, field: impl Into<String>) -> Self {
        self.conditions.push(Condition::NotNull(field.into()));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Attach the search predicate. Called after any modifier has run, so
    /// modifiers never see it.
    pub fn with_search(mut self, predicate: SearchPredicate) -> Self {
        self.search = Some(predicate);
        self
    }

    pub fn entity(&self) -> &EntityType {
        &self.entity
    }

    pub fn shared_entity(&self) -> Arc<EntityType> {
        self.entity.clone()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn search(&self) -> Option<&SearchPredicate> {
        self.search.as_ref()
    }

    pub fn limit_value(&self) -> Option<usize> {
        self.limit
    }

    /// True when every condition holds and the predicate (if any) matches.
    pub fn matches(&self, attributes: &Map<String, Value>) -> bool {
        self.conditions.iter().all(|c| c.evaluate(attributes))
            && self
                .search
                .as_ref()
                .map_or(true, |predicate| predicate.evaluate(attributes))
    }
}
