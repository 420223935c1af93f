// --- File: crates/services/payhandler_backend/src/routes.rs ---

use axum::{routing::any, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app_state::AppState;
use crate::handlers::{gateway_fallback_handler, invoke_handler};

/// Builds the HTTP surface: `/invoke` for raw gateway events, and a fallback
/// that maps every other request path onto the router.
///
/// Every response, including preflights, carries `Access-Control-Allow-Origin: *`.
pub fn routes(state: AppState) -> Router {
    let router = Router::new().route("/invoke", any(invoke_handler));

    #[cfg(feature = "openapi")]
    let router = router.route(
        crate::doc::OPENAPI_JSON_PATH,
        axum::routing::get(crate::doc::openapi_json_handler),
    );

    router
        .fallback(gateway_fallback_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
