//! Store failures reach the caller instead of turning into empty answers.

use translatable_select::{EntityKey, FieldContext, SearchOptions, SelectError, StoreError};

use crate::support::unreachable_services;

fn is_store_error(err: &SelectError) -> bool {
    matches!(err, SelectError::Store(StoreError::Backend(_)))
}

#[test]
fn search_service_propagates_store_errors() {
    let services = unreachable_services();
    let categories = services.registry().resolve("Category").unwrap();
    let ctx = FieldContext::for_locale("en");

    let err = services
        .search()
        .search(&categories, "sport", &SearchOptions::new(), ctx.locale())
        .unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));

    // Blank text never reaches the store.
    assert!(services
        .search()
        .search(&categories, "", &SearchOptions::new(), ctx.locale())
        .unwrap()
        .is_empty());
}

#[test]
fn field_hooks_propagate_store_errors() {
    let services = unreachable_services();
    let field = services
        .field_for_model("category_id", "Category", None, None)
        .unwrap()
        .preload(true);
    let ctx = FieldContext::for_locale("en");

    let err = field.search_results("sport", &ctx).unwrap_err();
    assert!(is_store_error(&err));
    assert_eq!(err.status_code(), 500);

    assert!(is_store_error(
        &field.option_label(Some(&EntityKey::from(1)), &ctx).unwrap_err()
    ));
    assert!(is_store_error(
        &field.option_labels(&[EntityKey::from(1)], &ctx).unwrap_err()
    ));
    assert!(is_store_error(&field.options(&ctx).unwrap_err()));
}

#[test]
fn registered_hooks_propagate_store_errors() {
    let services = unreachable_services();
    let hooks = services
        .field_for_model("category_id", "Category", None, None)
        .unwrap()
        .preload(true)
        .into_hooks();
    let ctx = FieldContext::for_locale("en");

    assert!(is_store_error(&hooks.search_results("sport", &ctx).unwrap_err()));
    assert!(is_store_error(&hooks.list_options(&ctx).unwrap_err()));
}
