// --- File: crates/services/payhandler_backend/src/workflow.rs ---
//! The two payment call sequences and their outcome notifications.
//!
//! Every operation fetches a fresh access token first. Failures never
//! propagate as `Err`: each outcome is rendered straight into a
//! [`ResponseEnvelope`].

use chrono::{SecondsFormat, Utc};
use payhandler_common::logging::log_result;
use payhandler_common::services::{
    BoxedError, NotificationService, PaymentCreation, PaymentService, ServiceFactory,
};
use payhandler_common::{
    ErrorCode, PaymentCreatedBody, PaymentExecutionRequest, PaymentRequest, ResponseEnvelope,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs payment operations against the configured provider and notifier.
#[derive(Clone)]
pub struct PaymentWorkflow {
    payments: Arc<dyn PaymentService<Error = BoxedError>>,
    notifier: Arc<dyn NotificationService<Error = BoxedError>>,
}

impl PaymentWorkflow {
    pub fn new(
        payments: Arc<dyn PaymentService<Error = BoxedError>>,
        notifier: Arc<dyn NotificationService<Error = BoxedError>>,
    ) -> Self {
        Self { payments, notifier }
    }

    pub fn from_factory(factory: &dyn ServiceFactory) -> Self {
        Self::new(factory.payment_service(), factory.notification_service())
    }

    /// Creates a sale and hands back its id and approval link.
    ///
    /// Only a token failure is notified; a failed or id-less creation call
    /// is answered with 1001 silently.
    pub async fn create_payment(&self, request: PaymentRequest) -> ResponseEnvelope {
        let Some(callback_url) = present(request.callback_url.as_deref()) else {
            warn!("create-payment without callbackUrl");
            return ResponseEnvelope::failure(ErrorCode::PaymentCreationFailed);
        };

        let token = match self.payments.fetch_access_token().await {
            Ok(token) => token,
            Err(e) => {
                error!(error = %e, "Could not obtain access token for payment creation");
                self.notify(Notification::failure(
                    ErrorCode::PaymentCreationFailed,
                    None,
                    None,
                ))
                .await;
                return ResponseEnvelope::failure(ErrorCode::PaymentCreationFailed);
            }
        };

        match self.payments.create_payment(&token, callback_url).await {
            Ok(PaymentCreation {
                id: Some(payment_id),
                approval_url,
                ..
            }) if !payment_id.is_empty() => {
                info!(payment_id = %payment_id, "Payment created");
                ResponseEnvelope::success(&PaymentCreatedBody {
                    payment_id,
                    approval_url,
                })
            }
            Ok(creation) => {
                error!(state = ?creation.state, "Payment creation returned no payment id");
                ResponseEnvelope::failure(ErrorCode::PaymentCreationFailed)
            }
            Err(e) => {
                error!(error = %e, "Payment creation failed");
                ResponseEnvelope::failure(ErrorCode::PaymentCreationFailed)
            }
        }
    }

    /// Executes an approved payment. Every terminal outcome past the
    /// presence checks sends exactly one notification.
    pub async fn execute_payment(&self, request: PaymentExecutionRequest) -> ResponseEnvelope {
        let (Some(payment_id), Some(payer_id), Some(username)) = (
            present(request.payment_id.as_deref()),
            present(request.payer_id.as_deref()),
            present(request.username.as_deref()),
        ) else {
            warn!("execute-payment without paymentId, payerId or username");
            return ResponseEnvelope::failure(ErrorCode::PaymentExecutionFailed);
        };

        let token = match self.payments.fetch_access_token().await {
            Ok(token) => token,
            Err(e) => {
                error!(error = %e, payment_id, "Could not obtain access token for payment execution");
                return self
                    .fail(ErrorCode::PaymentExecutionFailed, username, payment_id)
                    .await;
            }
        };

        match self
            .payments
            .execute_payment(&token, payment_id, payer_id)
            .await
        {
            Ok(execution) if execution.is_approved() => {
                info!(payment_id, username, "Payment approved");
                self.notify(Notification::approved(username, payment_id))
                    .await;
                ResponseEnvelope::empty_success()
            }
            Ok(execution) => {
                warn!(payment_id, state = %execution.state, "Payment not approved");
                self.fail(ErrorCode::PaymentNotApproved, username, payment_id)
                    .await
            }
            Err(e) => {
                error!(error = %e, payment_id, "Payment execution failed");
                self.fail(ErrorCode::PaymentExecutionFailed, username, payment_id)
                    .await
            }
        }
    }

    async fn fail(&self, code: ErrorCode, username: &str, payment_id: &str) -> ResponseEnvelope {
        self.notify(Notification::failure(code, Some(username), Some(payment_id)))
            .await;
        ResponseEnvelope::failure(code)
    }

    // A notifier failure is logged and otherwise ignored.
    async fn notify(&self, notification: Notification) {
        let _ = log_result(
            self.notifier
                .send_email(notification.subject, &notification.body)
                .await,
            &format!("Notification '{}' sent", notification.subject),
            &format!("Failed to send notification '{}'", notification.subject),
        );
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Subject and plain-text body of an outcome email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: &'static str,
    pub body: String,
}

impl Notification {
    pub fn approved(username: &str, payment_id: &str) -> Self {
        Self {
            subject: "Payment approved",
            body: format!(
                "Payment approved for user {}.\nPayment ID: {}\nTime: {}\n",
                username,
                payment_id,
                timestamp()
            ),
        }
    }

    pub fn failure(code: ErrorCode, username: Option<&str>, payment_id: Option<&str>) -> Self {
        let subject = match code {
            ErrorCode::PaymentCreationFailed => "Payment creation failed",
            ErrorCode::PaymentNotApproved => "Payment not approved",
            ErrorCode::PaymentExecutionFailed | ErrorCode::AccountUpgradeFailed => {
                "Payment execution failed"
            }
        };

        let mut body = match username {
            Some(username) => format!("{} for user {}.\n", subject, username),
            None => format!("{}.\n", subject),
        };
        if let Some(payment_id) = payment_id {
            body.push_str(&format!("Payment ID: {}\n", payment_id));
        }
        body.push_str(&format!("Error code: {}\nTime: {}\n", code, timestamp()));

        Self { subject, body }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approved_notification() {
        let n = Notification::approved("ada", "PAY-1");
        assert_eq!(n.subject, "Payment approved");
        assert!(n.body.starts_with("Payment approved for user ada.\nPayment ID: PAY-1\nTime: "));
    }

    #[test]
    fn test_failure_notification_names_code() {
        let n = Notification::failure(ErrorCode::PaymentNotApproved, Some("ada"), Some("PAY-1"));
        assert_eq!(n.subject, "Payment not approved");
        assert!(n.body.contains("for user ada"));
        assert!(n.body.contains("Payment ID: PAY-1"));
        assert!(n.body.contains("Error code: 1003"));
    }

    #[test]
    fn test_creation_failure_without_user() {
        let n = Notification::failure(ErrorCode::PaymentCreationFailed, None, None);
        assert_eq!(n.subject, "Payment creation failed");
        assert!(n.body.starts_with("Payment creation failed.\nError code: 1001\nTime: "));
        assert!(!n.body.contains("Payment ID"));
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let ts = timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_present_rejects_empty() {
        assert_eq!(present(Some("x")), Some("x"));
        assert_eq!(present(Some("")), None);
        assert_eq!(present(None), None);
    }
}
