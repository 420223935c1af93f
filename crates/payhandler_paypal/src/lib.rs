// --- File: crates/payhandler_paypal/src/lib.rs ---

pub mod auth;
pub mod error;
pub mod logic;
pub mod service;

pub use auth::fetch_access_token;
pub use error::PaypalError;
pub use logic::{create_payment, execute_payment, redirect_urls, RedirectUrls};
pub use service::PaypalPaymentService;
