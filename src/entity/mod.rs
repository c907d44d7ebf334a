//! Entities - descriptors, stored records, and the translation capability.

mod entity_type;
mod key;
mod model;
mod record;
mod registry;

pub use entity_type::{EntityType, Relation};
pub use key::EntityKey;
pub use model::Model;
pub use record::{value_text, Record, Translatable};
pub use registry::EntityRegistry;

pub(crate) use registry::short_name;
