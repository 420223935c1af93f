// --- File: crates/services/payhandler_backend/src/doc.rs ---
use axum::Json;
use payhandler_common::{GatewayEvent, ResponseEnvelope};
use utoipa::OpenApi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI description of the gateway entry point.
///
/// The per-path fallback is not listed; it accepts any path and method.
#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::invoke_handler),
    components(schemas(GatewayEvent, ResponseEnvelope)),
    tags(
        (name = "Gateway", description = "Gateway events routed to the payment workflow")
    )
)]
pub struct PayHandlerApiDoc;

pub async fn openapi_json_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(PayHandlerApiDoc::openapi())
}
