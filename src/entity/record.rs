use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{EntityKey, EntityType, Model};
use crate::error::StoreError;
use crate::locale::Translations;

/// The capability interface label resolution works against: a keyed thing
/// that may carry per-locale values.
pub trait Translatable {
    fn key(&self) -> &EntityKey;

    fn is_translatable(&self) -> bool;

    /// Whether `field` holds per-locale values.
    fn is_translatable_field(&self, field: &str) -> bool {
        self.is_translatable() && !self.translations(field).is_empty()
    }

    /// Raw stored value of a field.
    fn attribute(&self, field: &str) -> Option<&Value>;

    /// Stored translations of a field; empty when the field is not
    /// translatable or holds no map.
    fn translations(&self, field: &str) -> Translations;

    /// The raw value coerced to display text ("" when absent).
    fn attribute_text(&self, field: &str) -> String {
        value_text(self.attribute(field))
    }
}

/// Display text of a raw attribute. Maps and lists have no scalar form.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => String::new(),
    }
}

/// One stored row of an entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    entity: Arc<EntityType>,
    key: EntityKey,
    attributes: Map<String, Value>,
}

impl Record {
    pub fn new(entity: Arc<EntityType>, key: EntityKey, attributes: Map<String, Value>) -> Self {
        Self {
            entity,
            key,
            attributes,
        }
    }

    /// Build a record from an attribute map, reading the key from the type's
    /// key field.
    pub fn from_attributes(
        entity: Arc<EntityType>,
        attributes: Map<String, Value>,
    ) -> Result<Self, StoreError> {
        let key = attributes
            .get(entity.key())
            .and_then(EntityKey::from_value)
            .ok_or_else(|| StoreError::Decode {
                entity: entity.name().to_string(),
                message: format!("missing or invalid key field `{}`", entity.key()),
            })?;
        Ok(Self::new(entity, key, attributes))
    }

    /// Serialize a model into a record.
    pub fn from_model<M: Model>(model: &M) -> Result<Self, StoreError> {
        let entity = Arc::new(M::entity_type());
        let decode_err = |message: String| StoreError::Decode {
            entity: entity.name().to_string(),
            message,
        };
        let attributes = match serde_json::to_value(model).map_err(|e| decode_err(e.to_string()))? {
            Value::Object(map) => map,
            other => return Err(decode_err(format!("expected an object, got {}", other))),
        };
        Self::from_attributes(entity, attributes)
    }

    /// Deserialize the stored attributes back into a model.
    pub fn decode<M: DeserializeOwned>(&self) -> Result<M, StoreError> {
        serde_json::from_value(Value::Object(self.attributes.clone())).map_err(|e| {
            StoreError::Decode {
                entity: self.entity.name().to_string(),
                message: e.to_string(),
            }
        })
    }

    pub fn entity_type(&self) -> &EntityType {
        &self.entity
    }

    pub fn shared_entity_type(&self) -> Arc<EntityType> {
        self.entity.clone()
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn set_attribute(&mut self, field: impl Into<String>, value: Value) {
        self.attributes.insert(field.into(), value);
    }
}

impl Translatable for Record {
    fn key(&self) -> &EntityKey {
        &self.key
    }

    fn is_translatable(&self) -> bool {
        self.entity.is_translatable()
    }

    fn is_translatable_field(&self, field: &str) -> bool {
        self.entity.is_translatable_field(field)
    }

    fn attribute(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    fn translations(&self, field: &str) -> Translations {
        if !self.entity.is_translatable_field(field) {
            return Translations::new();
        }
        self.attributes
            .get(field)
            .map(Translations::from_value)
            .unwrap_or_default()
    }
}
