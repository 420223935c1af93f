// --- File: crates/payhandler_mail/src/error.rs ---
use payhandler_common::{external_service_error, PayHandlerError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Mail API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Mail API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Mail configuration missing or incomplete: {0}")]
    ConfigError(String),
}

impl From<MailError> for PayHandlerError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::RequestError(e) => {
                PayHandlerError::HttpError(format!("Mail request error: {}", e))
            }
            MailError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "Mail API",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            MailError::ConfigError(msg) => PayHandlerError::ConfigError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_keeps_message() {
        let err: PayHandlerError = MailError::ConfigError("mail.api_key unset".to_string()).into();
        assert!(matches!(err, PayHandlerError::ConfigError(ref m) if m == "mail.api_key unset"));
    }

    #[test]
    fn test_api_error_maps_to_external_service_error() {
        let err: PayHandlerError = MailError::ApiError {
            status_code: 401,
            message: "Forbidden".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "External service error: Mail API - Status: 401, Message: Forbidden"
        );
    }
}
