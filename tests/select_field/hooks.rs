//! The four field hooks, called directly and through a host.

use std::sync::Arc;

use translatable_select::{
    modifier, EntityKey, FieldContext, HookRegistry, InMemoryEntityStore,
    JsonConfigStore, LocaleStrategy, OptionMap, SelectConfig, SelectHooks, SelectServices,
    StaticPluginLocales,
};

use crate::support::{catalogue, registry, seed};

fn pairs(options: &OptionMap) -> Vec<(String, String)> {
    options
        .iter()
        .map(|(key, label)| (key.to_string(), label.to_string()))
        .collect()
}

#[test]
fn search_hook_matches_any_locale() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_model("category_id", "Category", None, None)
        .unwrap();

    let results = field
        .search_results("وەرزش", &FieldContext::for_locale("en"))
        .unwrap();
    assert_eq!(pairs(&results), vec![("2".to_string(), "Sports".to_string())]);

    assert!(field
        .search_results("   ", &FieldContext::for_locale("en"))
        .unwrap()
        .is_empty());
}

#[test]
fn search_locales_restrict_the_field() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_model("category_id", "Category", None, None)
        .unwrap()
        .search_locales(["en"]);
    let ctx = FieldContext::for_locale("ku");

    assert!(field.search_results("وەرزش", &ctx).unwrap().is_empty());
    assert_eq!(
        pairs(&field.search_results("sports", &ctx).unwrap()),
        vec![("2".to_string(), "وەرزش".to_string())]
    );
}

#[test]
fn searchable_fields_replace_the_defaults() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_model("category_id", "Category", None, None)
        .unwrap()
        .searchable_fields(["slug"]);
    let ctx = FieldContext::for_locale("en");

    assert!(field.search_results("تكنولوجيا", &ctx).unwrap().is_empty());
    assert_eq!(field.search_results("technology", &ctx).unwrap().len(), 1);
}

#[test]
fn search_limit_caps_results() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_model("product_id", "Product", None, None)
        .unwrap()
        .search_limit(1);

    let results = field
        .search_results("laptop", &FieldContext::for_locale("en"))
        .unwrap();
    assert_eq!(pairs(&results), vec![("10".to_string(), "Laptop".to_string())]);
}

#[test]
fn option_label_hook() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_model("category_id", "Category", None, None)
        .unwrap();
    let ar = FieldContext::for_locale("ar");

    assert_eq!(field.option_label(None, &ar).unwrap(), None);
    assert_eq!(
        field.option_label(Some(&EntityKey::from(2)), &ar).unwrap().as_deref(),
        Some("رياضة")
    );
    assert_eq!(field.option_label(Some(&EntityKey::from(99)), &ar).unwrap(), None);

    let kurdish_first = field.fallback_locale("ku");
    assert_eq!(
        kurdish_first
            .option_label(Some(&EntityKey::from(2)), &ar)
            .unwrap()
            .as_deref(),
        Some("وەرزش")
    );
}

#[test]
fn option_labels_hook_skips_missing_keys() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_model("category_id", "Category", None, None)
        .unwrap();
    let en = FieldContext::for_locale("en");

    assert!(field.option_labels(&[], &en).unwrap().is_empty());

    let labels = field
        .option_labels(&[EntityKey::from(2), EntityKey::from(99), EntityKey::from(1)], &en)
        .unwrap();
    assert_eq!(
        pairs(&labels),
        vec![
            ("1".to_string(), "Technology".to_string()),
            ("2".to_string(), "Sports".to_string()),
        ]
    );
}

#[test]
fn options_hook_only_when_preloading() {
    let cat = catalogue();
    let active = modifier(|q| q.where_eq("active", true));
    let field = cat
        .services
        .field_for_model("product_id", "Product", None, Some(active))
        .unwrap();
    let ar = FieldContext::for_locale("ar");

    assert!(field.has_query_modifier());
    assert!(field.options(&ar).unwrap().is_empty());

    let field = field.preload(true);
    assert_eq!(
        pairs(&field.options(&ar).unwrap()),
        vec![
            ("10".to_string(), "حاسوب محمول".to_string()),
            ("11".to_string(), "كرة القدم".to_string()),
        ]
    );
}

#[test]
fn relationship_field_searches_its_target() {
    let cat = catalogue();
    let field = cat
        .services
        .field_for_relationship("category_id", "category", None, None);
    let ctx = FieldContext::for_locale("ar").with_model("Product");

    assert_eq!(
        pairs(&field.search_results("تكنولوجيا", &ctx).unwrap()),
        vec![("1".to_string(), "تكنولوجيا".to_string())]
    );
}

#[test]
fn unset_hooks_answer_with_nothing() {
    let hooks = SelectHooks::new("empty");
    let ctx = FieldContext::for_locale("en");

    assert_eq!(hooks.name(), "empty");
    assert!(hooks.search_results("x", &ctx).unwrap().is_empty());
    assert_eq!(hooks.option_label(Some(&EntityKey::from(1)), &ctx).unwrap(), None);
    assert!(hooks.option_labels(&[EntityKey::from(1)], &ctx).unwrap().is_empty());
    assert!(hooks.list_options(&ctx).unwrap().is_empty());
}

#[test]
fn attached_hooks_delegate_to_the_field() {
    let cat = catalogue();
    let field = Arc::new(
        cat.services
            .field_for_model("category_id", "Category", None, None)
            .unwrap()
            .preload(true),
    );

    let mut hooks = SelectHooks::new("category_id");
    field.attach(&mut hooks);
    let fields = HookRegistry::new().with(hooks).with_default_locale("ku");

    assert_eq!(fields.names(), vec!["category_id"]);
    assert_eq!(fields.default_locale(), "ku");

    let hooks = fields.get("category_id").unwrap();
    let ctx = FieldContext::for_locale("ku");
    assert_eq!(
        pairs(&hooks.search_results("sport", &ctx).unwrap()),
        vec![("2".to_string(), "وەرزش".to_string())]
    );
    assert_eq!(
        hooks
            .option_label(Some(&EntityKey::from(1)), &ctx)
            .unwrap()
            .as_deref(),
        Some("تەکنەلۆژیا")
    );
    assert_eq!(hooks.list_options(&ctx).unwrap().len(), 3);
    assert!(fields.get("missing").is_none());
}

#[test]
fn into_hooks_keeps_the_field_name() {
    let cat = catalogue();
    let hooks = cat
        .services
        .field_for_model("tag_ids", "Tag", None, None)
        .unwrap()
        .multiple(true)
        .into_hooks();

    assert_eq!(hooks.name(), "tag_ids");
    let labels = hooks
        .option_labels(
            &[EntityKey::from(20), EntityKey::from(21)],
            &FieldContext::for_locale("ku"),
        )
        .unwrap();
    assert_eq!(
        pairs(&labels),
        vec![
            ("20".to_string(), "سوور".to_string()),
            ("21".to_string(), "Blue".to_string()),
        ]
    );
}

#[test]
fn services_with_a_plugin_locale_source() {
    let settings = SelectConfig {
        locale_strategy: LocaleStrategy::Filament,
        cache_locales: false,
        ..SelectConfig::default()
    };
    let store = InMemoryEntityStore::new();
    seed(&store);
    let services = SelectServices::new(
        settings,
        Arc::new(JsonConfigStore::default()),
        Some(Arc::new(StaticPluginLocales::new(["en", "ar"]))),
        registry(),
        store,
    );

    let ctx = FieldContext::for_locale("en");
    assert_eq!(services.locales().available_locales(ctx.locale()), vec!["en", "ar"]);

    let field = services
        .field_for_model("category_id", "Category", None, None)
        .unwrap();
    assert!(field.search_results("وەرزش", &ctx).unwrap().is_empty());
    assert_eq!(
        pairs(&field.search_results("رياضة", &ctx).unwrap()),
        vec![("2".to_string(), "Sports".to_string())]
    );

    services.clear_locale_cache();
    assert!(services.registry().contains("Tag"));
}
