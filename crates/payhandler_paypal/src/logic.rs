// --- File: crates/payhandler_paypal/src/logic.rs ---

use payhandler_common::services::{PaymentCreation, PaymentExecution};
use payhandler_common::{AccessToken, HTTP_CLIENT};
use payhandler_config::PaypalConfig;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::PaypalError;

// --- Structures for the PayPal payment payload ---

#[derive(Serialize, Debug)]
struct CreatePaymentPayload<'a> {
    intent: &'a str,
    payer: Payer<'a>,
    redirect_urls: RedirectUrls,
    transactions: Vec<Transaction<'a>>,
}

#[derive(Serialize, Debug)]
struct Payer<'a> {
    payment_method: &'a str,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RedirectUrls {
    pub return_url: String,
    pub cancel_url: String,
}

#[derive(Serialize, Debug)]
struct Transaction<'a> {
    amount: Amount<'a>,
    description: &'a str,
}

#[derive(Serialize, Debug)]
struct Amount<'a> {
    total: &'a str,
    currency: &'a str,
}

#[derive(Serialize, Debug)]
struct ExecutePaymentPayload<'a> {
    payer_id: &'a str,
}

// --- Structures for PayPal responses ---

#[derive(Deserialize, Debug)]
struct PaymentResponse {
    id: Option<String>,
    state: Option<String>,
    #[serde(default)]
    links: Vec<PaymentLink>,
}

#[derive(Deserialize, Debug)]
struct PaymentLink {
    href: String,
    rel: String,
}

// REST errors use name/message, the OAuth endpoint error/error_description.
#[derive(Deserialize, Debug, Default)]
struct PaypalErrorBody {
    name: Option<String>,
    message: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl PaypalErrorBody {
    fn summary(self) -> Option<String> {
        match (self.name.or(self.error), self.message.or(self.error_description)) {
            (Some(name), Some(message)) => Some(format!("{}: {}", name, message)),
            (name, message) => name.or(message),
        }
    }
}

// --- Helpers ---

/// Builds `{base_url}/{segments...}`, percent-encoding each segment.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, PaypalError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| PaypalError::ConfigError(format!("invalid base_url '{}': {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| PaypalError::ConfigError(format!("base_url '{}' cannot carry a path", base_url)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Reads the body, turning non-2xx statuses into `ApiError` and logging the
/// provider's error body.
pub(crate) async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
    operation: &str,
) -> Result<T, PaypalError> {
    let status = response.status();
    let body_text = response.text().await?;

    if !status.is_success() {
        error!(%status, body = %body_text, "PayPal {} failed", operation);
        let message = serde_json::from_str::<PaypalErrorBody>(&body_text)
            .ok()
            .and_then(PaypalErrorBody::summary)
            .unwrap_or_else(|| status.to_string());
        return Err(PaypalError::ApiError {
            status_code: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body_text)?)
}

/// Redirect URLs handed to PayPal, derived from the caller's callback.
pub fn redirect_urls(callback_url: &str) -> RedirectUrls {
    let separator = if callback_url.contains('?') { '&' } else { '?' };
    RedirectUrls {
        return_url: format!("{}{}status=success", callback_url, separator),
        cancel_url: format!("{}{}status=cancel", callback_url, separator),
    }
}

// --- Core Logic Functions ---

/// Creates a fixed-amount PayPal sale. The amount, currency and description
/// come from configuration, never from the caller.
pub async fn create_payment(
    config: &PaypalConfig,
    token: &AccessToken,
    callback_url: &str,
) -> Result<PaymentCreation, PaypalError> {
    let payload = CreatePaymentPayload {
        intent: "sale",
        payer: Payer {
            payment_method: "paypal",
        },
        redirect_urls: redirect_urls(callback_url),
        transactions: vec![Transaction {
            amount: Amount {
                total: config.amount(),
                currency: config.currency(),
            },
            description: config.description(),
        }],
    };

    let url = endpoint(&config.base_url, &["v1", "payments", "payment"])?;
    info!(
        amount = config.amount(),
        currency = config.currency(),
        "Creating PayPal payment"
    );

    let response = HTTP_CLIENT
        .post(url)
        .bearer_auth(token.secret())
        .json(&payload)
        .send()
        .await?;

    let payment: PaymentResponse = parse_response(response, "payment creation").await?;
    let approval_url = payment
        .links
        .into_iter()
        .find(|link| link.rel == "approval_url")
        .map(|link| link.href);

    info!(payment_id = ?payment.id, state = ?payment.state, "PayPal payment created");
    Ok(PaymentCreation {
        id: payment.id,
        state: payment.state,
        approval_url,
    })
}

/// Executes an approved payment for the given payer.
pub async fn execute_payment(
    config: &PaypalConfig,
    token: &AccessToken,
    payment_id: &str,
    payer_id: &str,
) -> Result<PaymentExecution, PaypalError> {
    let url = endpoint(
        &config.base_url,
        &["v1", "payments", "payment", payment_id, "execute"],
    )?;
    info!(payment_id, "Executing PayPal payment");

    let response = HTTP_CLIENT
        .post(url)
        .bearer_auth(token.secret())
        .json(&ExecutePaymentPayload { payer_id })
        .send()
        .await?;

    let payment: PaymentResponse = parse_response(response, "payment execution").await?;
    info!(payment_id, state = ?payment.state, "PayPal payment executed");
    Ok(PaymentExecution {
        id: payment.id,
        state: payment.state.unwrap_or_default(),
    })
}
