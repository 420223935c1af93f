use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use thiserror::Error;

/// The base error type shared by all PayHandler crates.
///
/// Integration crates keep their own error enums and implement
/// `From<TheirError> for PayHandlerError`.
#[derive(Error, Debug)]
pub enum PayHandlerError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The provider refused our credentials
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, PayHandlerError>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, PayHandlerError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| PayHandlerError::InternalError(format!("{}: {}", context, error)))
    }
}

impl From<reqwest::Error> for PayHandlerError {
    fn from(err: reqwest::Error) -> Self {
        PayHandlerError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for PayHandlerError {
    fn from(err: serde_json::Error) -> Self {
        PayHandlerError::ParseError(err.to_string())
    }
}

impl From<Infallible> for PayHandlerError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> PayHandlerError {
    PayHandlerError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

/// Error codes returned to the subscription app in failure bodies.
///
/// Serialized as the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    PaymentCreationFailed,
    PaymentExecutionFailed,
    PaymentNotApproved,
    /// Reserved for the account upgrade step, which is not implemented.
    AccountUpgradeFailed,
}

impl ErrorCode {
    pub fn code(self) -> u16 {
        match self {
            ErrorCode::PaymentCreationFailed => 1001,
            ErrorCode::PaymentExecutionFailed => 1002,
            ErrorCode::PaymentNotApproved => 1003,
            ErrorCode::AccountUpgradeFailed => 1004,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let codes = [
            ErrorCode::PaymentCreationFailed,
            ErrorCode::PaymentExecutionFailed,
            ErrorCode::PaymentNotApproved,
            ErrorCode::AccountUpgradeFailed,
        ]
        .map(ErrorCode::code);
        let mut deduped = codes.to_vec();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), codes.len());
    }

    #[test]
    fn test_error_code_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::PaymentNotApproved).unwrap();
        assert_eq!(json, "1003");
    }

    #[test]
    fn test_external_service_error_names_service() {
        let err = external_service_error("PayPal API", "Status: 400, Message: VALIDATION_ERROR");
        assert_eq!(
            err.to_string(),
            "External service error: PayPal API - Status: 400, Message: VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_context_wraps_source_error() {
        let parsed: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err = parsed.context("decoding event body").unwrap_err();
        assert!(err.to_string().starts_with("Internal error: decoding event body:"));
    }
}
