use serde::Serialize;

use super::EntityType;

/// Static types that describe their own entity type.
///
/// Usually derived:
///
/// ```ignore
/// use serde::{Deserialize, Serialize};
/// use translatable_select::{Model, Translations};
///
/// #[derive(Serialize, Deserialize, Model)]
/// #[model(table = "categories", translatable(name, description))]
/// struct Category {
///     id: u64,
///     name: Translations,
///     description: Translations,
///     slug: String,
/// }
/// ```
pub trait Model: Serialize {
    fn entity_type() -> EntityType;
}
