// --- File: crates/services/payhandler_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Wraps the concrete PayPal and mail services so the workflow only sees
//! `BoxedError` trait objects.
use payhandler_common::services::{
    BoxFuture, BoxedError, NotificationResult, NotificationService, PaymentCreation,
    PaymentExecution, PaymentService, ServiceFactory,
};
use payhandler_common::{AccessToken, PayHandlerError};
use payhandler_config::AppConfig;
use payhandler_mail::{LogOnlyNotificationService, MailNotificationService};
use payhandler_paypal::PaypalPaymentService;
use std::sync::Arc;
use tracing::{info, warn};

// Provider errors pass through PayHandlerError before being boxed.
fn box_error<E>(err: E) -> BoxedError
where
    PayHandlerError: From<E>,
{
    BoxedError::new(PayHandlerError::from(err))
}

struct BoxedPaymentService<S>(S);

impl<S> PaymentService for BoxedPaymentService<S>
where
    S: PaymentService,
    PayHandlerError: From<S::Error>,
{
    type Error = BoxedError;

    fn fetch_access_token(&self) -> BoxFuture<'_, AccessToken, Self::Error> {
        Box::pin(async move { self.0.fetch_access_token().await.map_err(box_error) })
    }

    fn create_payment<'a>(
        &'a self,
        token: &'a AccessToken,
        callback_url: &'a str,
    ) -> BoxFuture<'a, PaymentCreation, Self::Error> {
        Box::pin(async move {
            self.0
                .create_payment(token, callback_url)
                .await
                .map_err(box_error)
        })
    }

    fn execute_payment<'a>(
        &'a self,
        token: &'a AccessToken,
        payment_id: &'a str,
        payer_id: &'a str,
    ) -> BoxFuture<'a, PaymentExecution, Self::Error> {
        Box::pin(async move {
            self.0
                .execute_payment(token, payment_id, payer_id)
                .await
                .map_err(box_error)
        })
    }
}

struct BoxedNotificationService<S>(S);

impl<S> NotificationService for BoxedNotificationService<S>
where
    S: NotificationService,
    PayHandlerError: From<S::Error>,
{
    type Error = BoxedError;

    fn send_email<'a>(
        &'a self,
        subject: &'a str,
        body: &'a str,
    ) -> BoxFuture<'a, NotificationResult, Self::Error> {
        Box::pin(async move { self.0.send_email(subject, body).await.map_err(box_error) })
    }
}

/// Hands out the PayPal payment service and the configured notifier.
pub struct PayHandlerServiceFactory {
    payment_service: Arc<dyn PaymentService<Error = BoxedError>>,
    notification_service: Arc<dyn NotificationService<Error = BoxedError>>,
}

impl PayHandlerServiceFactory {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let payment_service: Arc<dyn PaymentService<Error = BoxedError>> = Arc::new(
            BoxedPaymentService(PaypalPaymentService::new(config.clone())),
        );

        let notification_service: Arc<dyn NotificationService<Error = BoxedError>> =
            match (config.use_mail, config.mail.as_ref()) {
                (true, Some(mail)) => {
                    info!(recipient = %mail.recipient, "Mail notifications enabled");
                    Arc::new(BoxedNotificationService(MailNotificationService::new(
                        mail.clone(),
                    )))
                }
                (true, None) => {
                    warn!("use_mail is set but [mail] is missing, notifications are only logged");
                    Arc::new(BoxedNotificationService(LogOnlyNotificationService))
                }
                (false, _) => {
                    info!("Mail disabled, notifications are only logged");
                    Arc::new(BoxedNotificationService(LogOnlyNotificationService))
                }
            };

        Self {
            payment_service,
            notification_service,
        }
    }
}

impl ServiceFactory for PayHandlerServiceFactory {
    fn payment_service(&self) -> Arc<dyn PaymentService<Error = BoxedError>> {
        self.payment_service.clone()
    }

    fn notification_service(&self) -> Arc<dyn NotificationService<Error = BoxedError>> {
        self.notification_service.clone()
    }
}
