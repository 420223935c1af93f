use payhandler_common::services::{BoxFuture, PaymentCreation, PaymentExecution, PaymentService};
use payhandler_common::AccessToken;
use payhandler_config::AppConfig;
use std::sync::Arc;

use crate::auth::fetch_access_token;
use crate::error::PaypalError;
use crate::logic::{create_payment, execute_payment};

/// PayPal payment service implementation
pub struct PaypalPaymentService {
    config: Arc<AppConfig>,
}

impl PaypalPaymentService {
    /// Create a new PayPal payment service
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}

impl PaymentService for PaypalPaymentService {
    type Error = PaypalError;

    fn fetch_access_token(&self) -> BoxFuture<'_, AccessToken, Self::Error> {
        Box::pin(fetch_access_token(&self.config.paypal))
    }

    fn create_payment<'a>(
        &'a self,
        token: &'a AccessToken,
        callback_url: &'a str,
    ) -> BoxFuture<'a, PaymentCreation, Self::Error> {
        Box::pin(create_payment(&self.config.paypal, token, callback_url))
    }

    fn execute_payment<'a>(
        &'a self,
        token: &'a AccessToken,
        payment_id: &'a str,
        payer_id: &'a str,
    ) -> BoxFuture<'a, PaymentExecution, Self::Error> {
        Box::pin(execute_payment(
            &self.config.paypal,
            token,
            payment_id,
            payer_id,
        ))
    }
}
