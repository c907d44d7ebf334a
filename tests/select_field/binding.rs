//! How a field finds its entity type.

use translatable_select::{
    ConfigError, EntityKey, EntityStore, FieldContext, InMemoryEntityStore, Record, SelectConfig,
    Translations,
};

use crate::support::models::{Category, Product};
use crate::support::{catalogue, catalogue_with, config};

fn product_record() -> Record {
    Record::from_model(&Product::new(10, 1, true, Translations::from([("en", "Laptop")]))).unwrap()
}

#[test]
fn unknown_model_is_a_configuration_error() {
    let cat = catalogue();
    let err = cat
        .services
        .field_for_model("widget_id", "Widget", None, None)
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownEntityType(_)));
}

#[test]
fn model_binding_resolves_immediately() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_model("category_id", "Category", None, None)
        .unwrap();
    assert_eq!(field.model_name().as_deref(), Some("Category"));
    assert_eq!(field.relationship_name(), None);

    let entity = field.entity_type(&FieldContext::default()).unwrap();
    assert_eq!(entity.table(), "categories");
}

#[test]
fn relationship_through_the_bound_record() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_relationship("category_id", "category", None, None);
    assert_eq!(field.relationship_name(), Some("category"));

    let ctx = FieldContext::for_locale("en").with_record(product_record());
    assert_eq!(field.entity_type(&ctx).unwrap().name(), "Category");
}

#[test]
fn relationship_through_the_form_model() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_relationship("product_ids", "products", None, None);

    let ctx = FieldContext::for_locale("en").with_model("Category");
    assert_eq!(field.entity_type(&ctx).unwrap().name(), "Product");
}

#[test]
fn relationship_through_the_resource_name() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_relationship("category_id", "category", None, None);

    let ctx = FieldContext::for_locale("en").with_resource("App\\Filament\\Resources\\ProductResource");
    assert_eq!(field.entity_type(&ctx).unwrap().name(), "Category");

    let bare = cat
        .services
        .field_for_relationship("category_id", "category", None, None);
    assert!(bare
        .entity_type(&FieldContext::default().with_resource("Resource"))
        .is_none());
    assert!(bare
        .entity_type(&FieldContext::default().with_resource("WidgetResource"))
        .is_none());
}

#[test]
fn resolved_type_is_cached() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_relationship("category_id", "category", None, None);

    let with_record = FieldContext::for_locale("en").with_record(product_record());
    assert!(field.entity_type(&with_record).is_some());
    assert_eq!(
        field.entity_type(&FieldContext::default()).unwrap().name(),
        "Category"
    );
}

#[test]
fn unresolvable_field_answers_with_nothing() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_relationship("category_id", "category", None, None)
        .preload(true);
    let ctx = FieldContext::for_locale("en");

    assert!(field.entity_type(&ctx).is_none());
    assert!(field.search_results("sport", &ctx).unwrap().is_empty());
    assert_eq!(field.option_label(Some(&EntityKey::from(2)), &ctx).unwrap(), None);
    assert!(field.option_labels(&[EntityKey::from(2)], &ctx).unwrap().is_empty());
    assert!(field.options(&ctx).unwrap().is_empty());
}

#[test]
fn unbound_field_resolves_nothing() {
    let cat = catalogue();
    let field = cat.services.field("loose");
    assert_eq!(field.model_name(), None);
    assert!(field.entity_type(&FieldContext::for_locale("en").with_model("Category")).is_none());
}

#[test]
fn defaults_and_builder_state() {
    let cat = catalogue();
    let field = cat.services.field("category_id");
    assert_eq!(field.name(), "category_id");
    assert_eq!(field.get_label_field(), "name");
    assert_eq!(field.get_search_limit(), 50);
    assert_eq!(field.get_search_debounce(), 500);
    assert!(field.is_searchable());
    assert!(!field.is_preloaded());
    assert!(!field.is_multiple());
    assert!(!field.is_required());
    assert!(!field.is_disabled());
    assert!(!field.has_query_modifier());
    assert_eq!(field.get_search_locales(), None);
    assert_eq!(field.get_fallback_locale(), None);
    assert_eq!(field.get_placeholder(), None);

    let field = field
        .label_field("slug")
        .searchable_fields(["name", "slug"])
        .search_locales(["en", "ku"])
        .fallback_locale("ku")
        .search_limit(5)
        .search_debounce(250)
        .multiple(true)
        .required(true)
        .search_prompt("Type to search")
        .searching_message("Searching...")
        .no_search_results_message("Nothing found")
        .placeholder("Pick a category")
        .helper_text("Searches every language")
        .label("Category");

    assert_eq!(field.get_label_field(), "slug");
    assert_eq!(field.get_searchable_fields(), &["name".to_string(), "slug".to_string()]);
    assert_eq!(field.get_search_locales(), Some(&["en".to_string(), "ku".to_string()][..]));
    assert_eq!(field.get_fallback_locale(), Some("ku"));
    assert_eq!(field.get_search_limit(), 5);
    assert_eq!(field.get_search_debounce(), 250);
    assert!(field.is_multiple());
    assert!(field.is_required());
    assert_eq!(field.get_search_prompt(), Some("Type to search"));
    assert_eq!(field.get_searching_message(), Some("Searching..."));
    assert_eq!(field.get_no_search_results_message(), Some("Nothing found"));
    assert_eq!(field.get_placeholder(), Some("Pick a category"));
    assert_eq!(field.get_helper_text(), Some("Searches every language"));
    assert_eq!(field.get_label(), Some("Category"));
}

#[test]
fn component_defaults_come_from_configuration() {
    let mut settings = config();
    settings.component_defaults.label_field = "slug".into();
    settings.component_defaults.search_limit = 1;
    settings.component_defaults.searchable = false;
    let cat = catalogue_with(settings, InMemoryEntityStore::new());

    let field = cat
        .services
        .field_for_model("category_id", "Category", None, None)
        .unwrap();
    assert_eq!(field.get_label_field(), "slug");
    assert_eq!(field.get_search_limit(), 1);
    assert!(!field.is_searchable());

    let relabelled = cat
        .services
        .field_for_relationship("category_id", "category", Some("name"), None);
    assert_eq!(relabelled.get_label_field(), "name");

    let unchanged = SelectConfig::default().component_defaults;
    assert_eq!(unchanged.label_field, "name");
}

#[test]
fn derived_models_decode_from_records() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_model("category_id", "Category", None, None)
        .unwrap();
    let entity = field.entity_type(&FieldContext::default()).unwrap();
    let record = cat
        .services
        .search()
        .store()
        .find(&entity, &EntityKey::from(2))
        .unwrap()
        .unwrap();

    let category: Category = record.decode().unwrap();
    assert_eq!(category.slug, "sports");
    assert_eq!(category.name.get("ku"), Some("وەرزش"));
}
