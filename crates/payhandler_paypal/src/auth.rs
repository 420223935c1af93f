// --- File: crates/payhandler_paypal/src/auth.rs ---
use payhandler_common::{AccessToken, HTTP_CLIENT};
use payhandler_config::env_vars::SECRET_MARKER;
use payhandler_config::PaypalConfig;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::PaypalError;
use crate::logic::{endpoint, parse_response};

#[derive(Deserialize, Debug)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Fetches a client-credentials bearer token.
///
/// Called once per operation; tokens are not cached between invocations.
pub async fn fetch_access_token(config: &PaypalConfig) -> Result<AccessToken, PaypalError> {
    if config.client_id.is_empty() {
        return Err(PaypalError::ConfigError("paypal.client_id is empty".to_string()));
    }
    if config.client_secret.is_empty() || config.client_secret == SECRET_MARKER {
        return Err(PaypalError::ConfigError(
            "paypal.client_secret was not resolved from the environment".to_string(),
        ));
    }

    let url = endpoint(&config.base_url, &["v1", "oauth2", "token"])?;
    debug!("Requesting PayPal access token from {}", url);

    let response = HTTP_CLIENT
        .post(url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let token: TokenResponse = parse_response(response, "token request").await?;
    if token.access_token.is_empty() {
        return Err(PaypalError::TokenError(
            "response carried no access_token".to_string(),
        ));
    }

    info!(expires_in = ?token.expires_in, "PayPal access token obtained");
    Ok(AccessToken::new(token.access_token))
}
