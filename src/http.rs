//! HTTP transport for select fields.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /fields/:field/search?q=` - search hook, `[{value, label}]` in order.
//! - `GET /fields/:field/label?value=` - single label hook, `{label}` (may be null).
//! - `POST /fields/:field/labels` - body `{values: [...]}`, bulk label hook.
//! - `GET /fields/:field/options` - options hook (empty unless preloading).
//! - `GET /health` - `{ "ok": true, "fields": [...] }`.
//!
//! The locale comes from `?locale=`, else the first `accept-language` tag,
//! else the registry's default locale.
//!
//! ## Example
//!
//! ```ignore
//! let hooks = HookRegistry::new().with(services.field_for_model("category_id", "Category", None, None)?.into_hooks());
//! translatable_select::http::serve(Arc::new(hooks), "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::entity::EntityKey;
use crate::error::SelectError;
use crate::field::{FieldContext, HookRegistry, SelectHooks};
use crate::options::OptionMap;

/// Build an axum `Router` serving the registered fields.
pub fn router(fields: Arc<HookRegistry>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/fields/:field/search", get(search_handler))
        .route("/fields/:field/label", get(label_handler))
        .route("/fields/:field/labels", post(labels_handler))
        .route("/fields/:field/options", get(options_handler))
        .with_state(fields)
}

/// Serve the fields over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve(fields: Arc<HookRegistry>, addr: &str) -> Result<(), std::io::Error> {
    let app = router(fields);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    locale: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LabelParams {
    value: Option<String>,
    locale: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LocaleParams {
    locale: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LabelsBody {
    #[serde(default)]
    values: Vec<Value>,
}

async fn health_handler(State(fields): State<Arc<HookRegistry>>) -> impl IntoResponse {
    Json(json!({ "ok": true, "fields": fields.names() }))
}

async fn search_handler(
    State(fields): State<Arc<HookRegistry>>,
    Path(field): Path<String>,
    Query(params): Query<SearchParams>,
    headers: HeaderMap,
) -> Response {
    let Some(hooks) = fields.get(&field) else {
        return unknown_field(&field);
    };
    let ctx = context(&fields, params.locale.as_deref(), &headers);
    respond(&hooks, hooks.search_results(&params.q, &ctx).map(option_list))
}

async fn label_handler(
    State(fields): State<Arc<HookRegistry>>,
    Path(field): Path<String>,
    Query(params): Query<LabelParams>,
    headers: HeaderMap,
) -> Response {
    let Some(hooks) = fields.get(&field) else {
        return unknown_field(&field);
    };
    let ctx = context(&fields, params.locale.as_deref(), &headers);
    let value = params.value.filter(|v| !v.is_empty()).map(EntityKey::new);
    let result = hooks
        .option_label(value.as_ref(), &ctx)
        .map(|label| json!({ "label": label }));
    respond(&hooks, result)
}

async fn labels_handler(
    State(fields): State<Arc<HookRegistry>>,
    Path(field): Path<String>,
    Query(params): Query<LocaleParams>,
    headers: HeaderMap,
    Json(body): Json<LabelsBody>,
) -> Response {
    let Some(hooks) = fields.get(&field) else {
        return unknown_field(&field);
    };
    let ctx = context(&fields, params.locale.as_deref(), &headers);
    let values: Vec<EntityKey> = body.values.iter().filter_map(EntityKey::from_value).collect();
    respond(&hooks, hooks.option_labels(&values, &ctx).map(option_list))
}

async fn options_handler(
    State(fields): State<Arc<HookRegistry>>,
    Path(field): Path<String>,
    Query(params): Query<LocaleParams>,
    headers: HeaderMap,
) -> Response {
    let Some(hooks) = fields.get(&field) else {
        return unknown_field(&field);
    };
    let ctx = context(&fields, params.locale.as_deref(), &headers);
    respond(&hooks, hooks.list_options(&ctx).map(option_list))
}

fn respond(hooks: &SelectHooks, result: Result<Value, SelectError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => {
            warn!(field = hooks.name(), error = %e, "select hook failed");
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

fn unknown_field(field: &str) -> Response {
    let body = json!({ "error": format!("unknown field: {}", field) });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// Options as an ordered `[{value, label}]` list.
fn option_list(options: OptionMap) -> Value {
    options
        .iter()
        .map(|(value, label)| json!({ "value": value.as_str(), "label": label }))
        .collect()
}

fn context(fields: &HookRegistry, locale: Option<&str>, headers: &HeaderMap) -> FieldContext {
    let locale = locale
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .or_else(|| accept_language(headers))
        .unwrap_or_else(|| fields.default_locale().to_string());
    FieldContext::for_locale(locale)
}

/// First tag of an `accept-language` header, without quality or region.
fn accept_language(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::ACCEPT_LANGUAGE)?.to_str().ok()?;
    let first = raw.split(',').next()?.split(';').next()?.trim();
    let primary = first.split(['-', '_']).next()?.trim();
    if primary.is_empty() || primary == "*" {
        return None;
    }
    Some(primary.to_ascii_lowercase())
}
