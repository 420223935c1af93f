// --- File: crates/payhandler_common/src/http.rs ---
use axum::{
    body::Body,
    response::{IntoResponse, Response},
};
use ::http::{HeaderName, HeaderValue, StatusCode};
use tracing::warn;

use crate::models::ResponseEnvelope;

// Include the client module
pub mod client;

/// Renders the gateway envelope as a plain HTTP response.
impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!("dropping invalid envelope header {}", name),
            }
        }
        response
    }
}
