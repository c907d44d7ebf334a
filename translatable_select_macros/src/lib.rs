mod model;

use proc_macro::TokenStream;

/// Derive `translatable_select::Model` for a struct.
///
/// Struct attributes, all optional:
///
/// ```ignore
/// #[derive(Serialize, Deserialize, Model)]
/// #[model(
///     table = "categories",          // default: snake_case plural of the type name
///     name = "Category",             // default: the type name
///     translatable(name, description),
///     locales("en", "ar"),           // entity-level locale override
///     search(slug),                  // extra plain fields searched by default
///     relations(products = "Product"),
/// )]
/// struct Category { id: u64, name: Translations, description: Translations, slug: String }
/// ```
///
/// Field attributes:
/// - `#[model(key)]` marks the key field (default: the field named `id`).
/// - `#[model(belongs_to = "Category")]` on `category_id` declares the
///   relation `category` targeting `Category`.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model(input)
}
