// --- File: crates/payhandler_common/src/models.rs ---
//
// Wire shapes shared between the router, the workflow and the provider
// crates. Field names follow the subscription app's camelCase JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ErrorCode;

pub const CORS_ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Event handed to the handler by the API gateway.
///
/// `body` is whatever the gateway forwarded: usually a JSON-encoded string,
/// sometimes an already decoded object. Unknown gateway fields are ignored.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GatewayEvent {
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub body: Option<serde_json::Value>,
}

impl GatewayEvent {
    pub fn new(resource: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self {
            resource: resource.into(),
            body,
        }
    }
}

/// Input to payment creation.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(default)]
    pub callback_url: Option<String>,
}

/// Input to executing an approved payment.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentExecutionRequest {
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub payer_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Success body of `/create-payment`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreatedBody {
    pub payment_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub approval_url: Option<String>,
}

/// Failure body carrying the numeric error code.
#[derive(Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: ErrorCode,
}

/// OAuth2 bearer token. Never cached, never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Fixed response wrapper expected by the gateway.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub is_base64_encoded: bool,
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON document encoded as a string.
    pub body: String,
}

impl ResponseEnvelope {
    pub fn new<T: Serialize>(status_code: u16, data: &T) -> Self {
        let body = serde_json::to_string(data).unwrap_or_else(|_| "{}".to_string());
        let headers = BTreeMap::from([
            (CORS_ALLOW_ORIGIN_HEADER.to_string(), "*".to_string()),
            (CONTENT_TYPE_HEADER.to_string(), "application/json".to_string()),
        ]);
        Self {
            is_base64_encoded: false,
            status_code,
            headers,
            body,
        }
    }

    pub fn success<T: Serialize>(data: &T) -> Self {
        Self::new(200, data)
    }

    /// 200 with `{}`.
    pub fn empty_success() -> Self {
        Self::new(200, &serde_json::json!({}))
    }

    pub fn failure(code: ErrorCode) -> Self {
        Self::new(500, &ErrorBody { error_code: code })
    }

    /// 500 with `{}`, used for unknown routes.
    pub fn empty_failure() -> Self {
        Self::new(500, &serde_json::json!({}))
    }

    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}
