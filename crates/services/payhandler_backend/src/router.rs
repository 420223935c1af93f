// --- File: crates/services/payhandler_backend/src/router.rs ---
use payhandler_common::{Context, GatewayEvent, PayHandlerError, ResponseEnvelope};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::app_state::AppState;

/// Resources the gateway may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    CreatePayment,
    ExecutePayment,
}

impl Route {
    /// Matches a resource path, tolerating one trailing slash.
    pub fn from_resource(resource: &str) -> Option<Self> {
        match resource.strip_suffix('/').unwrap_or(resource) {
            "/create-payment" => Some(Route::CreatePayment),
            "/execute-payment" => Some(Route::ExecutePayment),
            _ => None,
        }
    }
}

/// Decodes the gateway body into a JSON value.
///
/// A JSON-encoded string is parsed, an object is used as is and a missing
/// body becomes `{}`.
pub fn decode_body(body: Option<Value>) -> Result<Value, PayHandlerError> {
    match body {
        None | Some(Value::Null) => Ok(Value::Object(Map::new())),
        Some(Value::String(raw)) if raw.trim().is_empty() => Ok(Value::Object(Map::new())),
        Some(Value::String(raw)) => {
            serde_json::from_str::<Value>(&raw).context("request body is not valid JSON")
        }
        Some(other) => Ok(other),
    }
}

// Undecodable bodies read as a request with every field missing.
fn parse_request<T: DeserializeOwned + Default>(body: Option<Value>) -> T {
    let parsed = decode_body(body)
        .and_then(|value| serde_json::from_value(value).map_err(PayHandlerError::from));
    match parsed {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Unreadable request body, treating fields as missing");
            T::default()
        }
    }
}

/// Routes one gateway event to its workflow and returns the envelope.
///
/// Unknown resources get a 500 with `{}` and no outbound calls.
pub async fn dispatch(state: &AppState, event: GatewayEvent) -> ResponseEnvelope {
    let span = info_span!(
        "invocation",
        id = %Uuid::new_v4(),
        resource = %event.resource
    );

    async move {
        let Some(route) = Route::from_resource(&event.resource) else {
            warn!("Unknown resource");
            return ResponseEnvelope::empty_failure();
        };
        info!(?route, "Dispatching");

        let workflow = state.workflow();
        let envelope = match route {
            Route::CreatePayment => workflow.create_payment(parse_request(event.body)).await,
            Route::ExecutePayment => workflow.execute_payment(parse_request(event.body)).await,
        };

        info!(status = envelope.status_code, "Invocation finished");
        envelope
    }
    .instrument(span)
    .await
}
