//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use serde_json::{json, Value};
use translatable_select::{http, modifier, HookRegistry};

use crate::support::{catalogue, unreachable_services};

fn test_fields() -> Arc<HookRegistry> {
    let cat = catalogue();
    let categories = cat
        .services
        .field_for_model("category_id", "Category", None, None)
        .unwrap()
        .into_hooks();
    let products = cat
        .services
        .field_for_model(
            "product_id",
            "Product",
            None,
            Some(modifier(|q| q.where_eq("active", true))),
        )
        .unwrap()
        .preload(true)
        .into_hooks();

    Arc::new(
        HookRegistry::new()
            .with(categories)
            .with(products)
            .with_default_locale("en"),
    )
}

/// Bind to port 0 and return the actual address.
async fn start_server(fields: Arc<HookRegistry>) -> String {
    let app = http::router(fields);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_lists_fields() {
    let base = start_server(test_fields()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["fields"], json!(["category_id", "product_id"]));
}

#[tokio::test]
async fn search_in_requested_locale() {
    let base = start_server(test_fields()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/fields/category_id/search"))
        .query(&[("q", "sport"), ("locale", "ku")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([{ "value": "2", "label": "وەرزش" }]));
}

#[tokio::test]
async fn search_locale_from_accept_language() {
    let base = start_server(test_fields()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/fields/category_id/search"))
        .query(&[("q", "tech")])
        .header("accept-language", "ar-IQ,en;q=0.8")
        .send()
        .await
        .unwrap();

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([{ "value": "1", "label": "تكنولوجيا" }]));
}

#[tokio::test]
async fn empty_search_is_an_empty_list() {
    let base = start_server(test_fields()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/fields/category_id/search"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn single_label() {
    let base = start_server(test_fields()).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{base}/fields/category_id/label"))
        .query(&[("value", "1")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "label": "Technology" }));

    let body: Value = client
        .get(format!("{base}/fields/category_id/label"))
        .query(&[("value", "999")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "label": null }));

    let body: Value = client
        .get(format!("{base}/fields/category_id/label"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "label": null }));
}

#[tokio::test]
async fn bulk_labels() {
    let base = start_server(test_fields()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/fields/category_id/labels"))
        .query(&[("locale", "ar")])
        .json(&json!({ "values": [2, "1", null] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!([
            { "value": "1", "label": "تكنولوجيا" },
            { "value": "2", "label": "رياضة" },
        ])
    );
}

#[tokio::test]
async fn preloaded_options() {
    let base = start_server(test_fields()).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{base}/fields/product_id/options"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        body,
        json!([
            { "value": "10", "label": "Laptop" },
            { "value": "11", "label": "Football" },
        ])
    );

    let body: Value = client
        .get(format!("{base}/fields/category_id/options"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn unknown_field_is_not_found() {
    let base = start_server(test_fields()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/fields/nope/search"))
        .query(&[("q", "x")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "unknown field: nope" }));
}

#[tokio::test]
async fn store_failure_is_a_server_error() {
    let services = unreachable_services();
    let hooks = services
        .field_for_model("category_id", "Category", None, None)
        .unwrap()
        .into_hooks();
    let base = start_server(Arc::new(HookRegistry::new().with(hooks))).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/fields/category_id/search"))
        .query(&[("q", "sport")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "entity store error: connection refused" }));

    let resp = client
        .post(format!("{base}/fields/category_id/labels"))
        .json(&json!({ "values": [1] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
}
