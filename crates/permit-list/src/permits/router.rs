use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use super::envelope;
use super::service::PermitListService;
use crate::source::ResponseSource;
use crate::telemetry::RequestContext;

const LOGGER_ROOT: &str = "permitlist";

/// Router exposing the public listing endpoints. Unknown paths answer with a 404 envelope.
pub fn permit_router<S>(service: Arc<PermitListService<S>>) -> Router
where
    S: ResponseSource + 'static,
{
    Router::new()
        .route("/welcome", get(welcome_handler))
        .route("/list/:permit_type", get(list_handler::<S>))
        .fallback(not_found_handler)
        .with_state(service)
}

pub(crate) async fn welcome_handler() -> Json<envelope::Envelope<serde_json::Value>> {
    Json(envelope::success(json!({
        "message": "Welcome to the permit list service"
    })))
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<PermitListService<S>>>,
    Path(permit_type): Path<String>,
) -> Response
where
    S: ResponseSource + 'static,
{
    let ctx = RequestContext::new(LOGGER_ROOT)
        .child("get_permit_list")
        .child(&permit_type);

    match service.list(&permit_type, &ctx).await {
        Ok(listing) => (StatusCode::OK, Json(envelope::success(listing))).into_response(),
        Err(_) => (StatusCode::BAD_REQUEST, Json(envelope::error("ERROR"))).into_response(),
    }
}

pub(crate) async fn not_found_handler(uri: Uri) -> Response {
    warn!(logger = LOGGER_ROOT, path = %uri.path(), "404 - Not Found");
    (
        StatusCode::NOT_FOUND,
        Json(envelope::error("404 - Not Found")),
    )
        .into_response()
}
