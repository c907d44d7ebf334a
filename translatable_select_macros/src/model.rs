use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{Data, DeriveInput, Fields, LitStr, Token};

#[derive(Default)]
struct ModelAttrs {
    name: Option<String>,
    table: Option<String>,
    translatable: Option<Vec<String>>,
    locales: Option<Vec<String>>,
    search: Vec<String>,
    relations: Vec<(String, String)>,
}

pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let attrs = model_attrs(input)?;
    let (key, mut relations) = field_attrs(input)?;
    relations.extend(attrs.relations);

    let type_name = attrs.name.unwrap_or_else(|| ident.to_string());
    let table = attrs
        .table
        .unwrap_or_else(|| default_table(&ident.to_string()));

    // Turbofish keeps `translatable()` with no fields well-typed.
    let translatable = attrs.translatable.map(|fields| {
        let n = fields.len();
        quote! { .translatable::<[&str; #n], &str>([#(#fields),*]) }
    });
    let locales = attrs.locales.map(|locales| {
        let n = locales.len();
        quote! { .locales::<[&str; #n], &str>([#(#locales),*]) }
    });
    let search = if attrs.search.is_empty() {
        None
    } else {
        let fields = &attrs.search;
        Some(quote! { .search_fields([#(#fields),*]) })
    };
    let relations = relations.iter().map(|(name, target)| {
        quote! { .relation(#name, #target) }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::translatable_select::Model for #ident #ty_generics #where_clause {
            fn entity_type() -> ::translatable_select::EntityType {
                ::translatable_select::EntityType::new(#type_name, #table)
                    .key_field(#key)
                    #translatable
                    #locales
                    #search
                    #(#relations)*
            }
        }
    })
}

fn model_attrs(input: &DeriveInput) -> syn::Result<ModelAttrs> {
    let mut attrs = ModelAttrs::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("model") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.table = Some(value.value());
            } else if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.name = Some(value.value());
            } else if meta.path.is_ident("translatable") {
                let mut fields = Vec::new();
                meta.parse_nested_meta(|inner| {
                    fields.push(ident_of(&inner.path)?);
                    Ok(())
                })?;
                attrs.translatable = Some(fields);
            } else if meta.path.is_ident("search") {
                meta.parse_nested_meta(|inner| {
                    attrs.search.push(ident_of(&inner.path)?);
                    Ok(())
                })?;
            } else if meta.path.is_ident("locales") {
                let content;
                syn::parenthesized!(content in meta.input);
                let locales = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                attrs.locales = Some(locales.iter().map(LitStr::value).collect());
            } else if meta.path.is_ident("relations") {
                meta.parse_nested_meta(|inner| {
                    let name = ident_of(&inner.path)?;
                    let target: LitStr = inner.value()?.parse()?;
                    attrs.relations.push((name, target.value()));
                    Ok(())
                })?;
            } else {
                return Err(meta.error("unsupported model attribute"));
            }
            Ok(())
        })?;
    }
    Ok(attrs)
}

/// Key field name plus `belongs_to` relations declared on fields.
fn field_attrs(input: &DeriveInput) -> syn::Result<(String, Vec<(String, String)>)> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "Model can only be derived for structs"));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(&input.ident, "Model requires named fields"));
    };

    let mut key = None;
    let mut relations = Vec::new();
    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let field_name = field_ident.to_string();
        for attr in &field.attrs {
            if !attr.path().is_ident("model") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    key = Some(field_name.clone());
                } else if meta.path.is_ident("belongs_to") {
                    let target: LitStr = meta.value()?.parse()?;
                    let relation = field_name
                        .strip_suffix("_id")
                        .unwrap_or(&field_name)
                        .to_string();
                    relations.push((relation, target.value()));
                } else {
                    return Err(meta.error("unsupported model field attribute"));
                }
                Ok(())
            })?;
        }
    }

    let key = match key {
        Some(key) => key,
        None if fields.named.iter().any(|f| f.ident.as_ref().is_some_and(|i| i == "id")) => "id".to_string(),
        None => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Model derive: no field marked with #[model(key)] and no field named `id`",
            ))
        }
    };
    Ok((key, relations))
}

fn ident_of(path: &syn::Path) -> syn::Result<String> {
    path.get_ident()
        .map(ToString::to_string)
        .ok_or_else(|| syn::Error::new_spanned(path, "expected a field name"))
}

/// snake_case plural of a type name: `Category` -> `categories`.
fn default_table(name: &str) -> String {
    let snake = to_snake_case(name);
    if let Some(stem) = snake.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{}ies", stem);
        }
    }
    if snake.ends_with('s') || snake.ends_with('x') {
        return format!("{}es", snake);
    }
    format!("{}s", snake)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
