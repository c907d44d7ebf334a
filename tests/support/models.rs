//! Test domain: a small catalogue with translated names.

use serde::{Deserialize, Serialize};
use translatable_select::{Model, Translations};

#[derive(Debug, Clone, Serialize, Deserialize, Model)]
#[model(
    table = "categories",
    translatable(name, description),
    search(slug),
    relations(products = "Product")
)]
pub struct Category {
    pub id: u64,
    pub name: Translations,
    pub description: Translations,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Model)]
#[model(translatable(name, description), relations(tags = "Tag"))]
pub struct Product {
    pub id: u64,
    pub name: Translations,
    pub description: Translations,
    #[model(belongs_to = "Category")]
    pub category_id: u64,
    pub active: bool,
}

/// Searched in its own locales only.
#[derive(Debug, Clone, Serialize, Deserialize, Model)]
#[model(translatable(name), locales("en", "ku"))]
pub struct Tag {
    pub id: u64,
    pub name: Translations,
}

/// No translation capability at all.
#[derive(Debug, Clone, Serialize, Deserialize, Model)]
pub struct Author {
    #[model(key)]
    pub code: String,
    pub name: String,
    pub books: u32,
}

impl Category {
    pub fn new(id: u64, slug: &str, name: Translations) -> Self {
        Self {
            id,
            name,
            description: Translations::new(),
            slug: slug.into(),
        }
    }
}

impl Product {
    pub fn new(id: u64, category_id: u64, active: bool, name: Translations) -> Self {
        Self {
            id,
            name,
            description: Translations::new(),
            category_id,
            active,
        }
    }
}
