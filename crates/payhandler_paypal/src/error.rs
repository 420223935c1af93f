// --- File: crates/payhandler_paypal/src/error.rs ---
use payhandler_common::{external_service_error, PayHandlerError};
use thiserror::Error;

/// PayPal-specific error types.
#[derive(Error, Debug)]
pub enum PaypalError {
    /// Error occurred during a PayPal API request
    #[error("PayPal API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Non-2xx answer from the PayPal API
    #[error("PayPal API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing PayPal API response
    #[error("Failed to parse PayPal API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or unusable PayPal configuration
    #[error("PayPal configuration missing or incomplete: {0}")]
    ConfigError(String),

    /// The token endpoint answered 2xx without a usable bearer token
    #[error("PayPal token response unusable: {0}")]
    TokenError(String),
}

impl From<PaypalError> for PayHandlerError {
    fn from(err: PaypalError) -> Self {
        match err {
            PaypalError::RequestError(e) => {
                PayHandlerError::HttpError(format!("PayPal request error: {}", e))
            }
            PaypalError::ApiError {
                status_code: 401,
                message,
            } => PayHandlerError::AuthError(format!("PayPal rejected credentials: {}", message)),
            PaypalError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "PayPal API",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            PaypalError::ParseError(e) => {
                PayHandlerError::ParseError(format!("PayPal response parse error: {}", e))
            }
            PaypalError::ConfigError(msg) => PayHandlerError::ConfigError(msg),
            PaypalError::TokenError(msg) => {
                PayHandlerError::AuthError(format!("PayPal issued no usable token: {}", msg))
            }
        }
    }
}
