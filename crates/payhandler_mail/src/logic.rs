// --- File: crates/payhandler_mail/src/logic.rs ---
use payhandler_common::services::NotificationResult;
use payhandler_common::HTTP_CLIENT;
use payhandler_config::env_vars::SECRET_MARKER;
use payhandler_config::MailConfig;
use reqwest::Url;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::MailError;

#[derive(Deserialize, Debug, Default)]
struct MessageResponse {
    id: Option<String>,
    message: Option<String>,
}

fn messages_endpoint(config: &MailConfig) -> Result<Url, MailError> {
    let mut url = Url::parse(&config.base_url).map_err(|e| {
        MailError::ConfigError(format!("invalid mail base_url '{}': {}", config.base_url, e))
    })?;
    url.path_segments_mut()
        .map_err(|_| MailError::ConfigError(format!("mail base_url '{}' cannot carry a path", config.base_url)))?
        .pop_if_empty()
        .extend(["v3", config.domain.as_str(), "messages"]);
    Ok(url)
}

/// Sends a plain-text message from the configured sender to the configured
/// recipient.
pub async fn send_mail(
    config: &MailConfig,
    subject: &str,
    body: &str,
) -> Result<NotificationResult, MailError> {
    if config.api_key.is_empty() || config.api_key == SECRET_MARKER {
        return Err(MailError::ConfigError(
            "mail.api_key was not resolved from the environment".to_string(),
        ));
    }

    let url = messages_endpoint(config)?;
    let params = [
        ("from", config.sender.as_str()),
        ("to", config.recipient.as_str()),
        ("subject", subject),
        ("text", body),
    ];
    info!(to = %config.recipient, subject, "Sending notification email");

    let response = HTTP_CLIENT
        .post(url)
        .basic_auth("api", Some(&config.api_key))
        .form(&params)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;
    if !status.is_success() {
        error!(%status, body = %body_text, "Mail API rejected message");
        return Err(MailError::ApiError {
            status_code: status.as_u16(),
            message: body_text,
        });
    }

    // The message was accepted; an unexpected body only loses the id.
    let parsed: MessageResponse = serde_json::from_str(&body_text).unwrap_or_else(|e| {
        warn!(error = %e, body = %body_text, "Unexpected mail API response body");
        MessageResponse::default()
    });
    info!(message_id = ?parsed.id, "Notification email queued");
    Ok(NotificationResult {
        id: parsed.id,
        status: parsed.message.unwrap_or_else(|| "queued".to_string()),
    })
}
