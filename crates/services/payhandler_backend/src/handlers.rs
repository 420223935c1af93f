// --- File: crates/services/payhandler_backend/src/handlers.rs ---
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection},
        State,
    },
    response::{IntoResponse, Json, Response},
};
use http::Uri;
use payhandler_common::{GatewayEvent, ResponseEnvelope};
use serde_json::Value;
use tracing::warn;

use crate::app_state::AppState;
use crate::router::dispatch;

/// Platform-invoke style entry point: takes a raw gateway event and answers
/// with the envelope as JSON.
///
/// An unreadable event is answered with the empty 500 envelope, rendered as
/// the HTTP response.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/invoke",
    request_body = GatewayEvent,
    responses(
        (status = 200, description = "Envelope produced by the router", body = ResponseEnvelope),
        (status = 500, description = "Event could not be read; empty failure envelope")
    ),
    tag = "Gateway"
))]
pub async fn invoke_handler(
    State(state): State<AppState>,
    event: Result<Json<GatewayEvent>, JsonRejection>,
) -> Response {
    match event {
        Ok(Json(event)) => Json(dispatch(&state, event).await).into_response(),
        Err(rejection) => {
            warn!(error = %rejection, "Rejected gateway event");
            ResponseEnvelope::empty_failure().into_response()
        }
    }
}

/// Treats any other request as a gateway event for its path and renders the
/// envelope as the HTTP response.
pub async fn gateway_fallback_handler(
    State(state): State<AppState>,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> ResponseEnvelope {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection, path = uri.path(), "Unreadable request body");
            return ResponseEnvelope::empty_failure();
        }
    };
    let body = if body.is_empty() {
        None
    } else {
        Some(Value::String(String::from_utf8_lossy(&body).into_owned()))
    };

    dispatch(&state, GatewayEvent::new(uri.path(), body)).await
}
