// --- File: crates/payhandler_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// PayPal sandbox REST endpoint, used when no `paypal.base_url` is configured.
pub const DEFAULT_PAYPAL_BASE_URL: &str = "https://api.sandbox.paypal.com";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_AMOUNT: &str = "9.99";
pub const DEFAULT_DESCRIPTION: &str = "Subscription upgrade";

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- PayPal Config ---
// client_secret is normally "secret_from_env" in the config files and
// resolved from PAYHANDLER_SECRET_PAYPAL_CLIENT_SECRET or PAYPAL_CLIENT_SECRET.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaypalConfig {
    #[serde(default = "default_paypal_base_url")]
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub currency: Option<String>,
    /// Fixed sale amount as PayPal expects it, e.g. "9.99".
    pub amount: Option<String>,
    pub description: Option<String>,
}

impl PaypalConfig {
    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn amount(&self) -> &str {
        self.amount.as_deref().unwrap_or(DEFAULT_AMOUNT)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }
}

fn default_paypal_base_url() -> String {
    DEFAULT_PAYPAL_BASE_URL.to_string()
}

// --- Mail Config ---
// Transactional email API (Mailgun compatible). api_key comes from env.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MailConfig {
    pub base_url: String,
    pub domain: String,
    pub api_key: String,
    pub sender: String,
    pub recipient: String,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,

    // Without mail the notifier only logs.
    #[serde(default)]
    pub use_mail: bool,

    pub paypal: PaypalConfig,
    #[serde(default)]
    pub mail: Option<MailConfig>,

    /// Default tracing directive, overridden by RUST_LOG.
    #[serde(default)]
    pub log_level: Option<String>,
}
