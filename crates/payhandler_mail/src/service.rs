use payhandler_common::services::{BoxFuture, NotificationResult, NotificationService};
use payhandler_config::MailConfig;
use std::convert::Infallible;
use tracing::info;

use crate::error::MailError;
use crate::logic::send_mail;

/// Sends notifications through the mail API.
pub struct MailNotificationService {
    config: MailConfig,
}

impl MailNotificationService {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }
}

impl NotificationService for MailNotificationService {
    type Error = MailError;

    fn send_email<'a>(
        &'a self,
        subject: &'a str,
        body: &'a str,
    ) -> BoxFuture<'a, NotificationResult, Self::Error> {
        Box::pin(send_mail(&self.config, subject, body))
    }
}

/// Notifier installed when mail is disabled. Writes the message to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyNotificationService;

impl NotificationService for LogOnlyNotificationService {
    type Error = Infallible;

    fn send_email<'a>(
        &'a self,
        subject: &'a str,
        body: &'a str,
    ) -> BoxFuture<'a, NotificationResult, Self::Error> {
        Box::pin(async move {
            info!(subject, body, "Mail disabled, notification logged only");
            Ok(NotificationResult {
                id: None,
                status: "logged".to_string(),
            })
        })
    }
}
