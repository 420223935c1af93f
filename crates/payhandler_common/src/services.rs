//! Service abstractions for the external systems PayHandler talks to.
//!
//! The workflow only sees these traits, so tests can swap PayPal and the
//! mail API for in-process fakes.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::models::AccessToken;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Type-erased error used behind trait objects.
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl BoxedError {
    pub fn new<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        BoxedError(Box::new(err))
    }
}

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Operations against the payment provider.
///
/// Token retrieval is its own call so callers can tell a credential
/// failure apart from a failed payment call.
pub trait PaymentService: Send + Sync {
    /// Error type returned by payment service operations.
    type Error: StdError + Send + Sync + 'static;

    /// Fetch a fresh OAuth2 bearer token.
    fn fetch_access_token(&self) -> BoxFuture<'_, AccessToken, Self::Error>;

    /// Create a fixed-amount sale whose redirects point back at `callback_url`.
    fn create_payment<'a>(
        &'a self,
        token: &'a AccessToken,
        callback_url: &'a str,
    ) -> BoxFuture<'a, PaymentCreation, Self::Error>;

    /// Execute a payment the payer has approved.
    fn execute_payment<'a>(
        &'a self,
        token: &'a AccessToken,
        payment_id: &'a str,
        payer_id: &'a str,
    ) -> BoxFuture<'a, PaymentExecution, Self::Error>;
}

/// Sends the outcome notifications. Sender and recipient are fixed by the
/// implementation's configuration.
pub trait NotificationService: Send + Sync {
    /// Error type returned by notification service operations.
    type Error: StdError + Send + Sync + 'static;

    /// Send a plain-text email.
    fn send_email<'a>(
        &'a self,
        subject: &'a str,
        body: &'a str,
    ) -> BoxFuture<'a, NotificationResult, Self::Error>;
}

/// Hands out the services a request needs.
pub trait ServiceFactory: Send + Sync {
    fn payment_service(&self) -> Arc<dyn PaymentService<Error = BoxedError>>;

    fn notification_service(&self) -> Arc<dyn NotificationService<Error = BoxedError>>;
}

/// Result of a payment creation call. A 2xx response without an `id` still
/// counts as a failed creation.
#[derive(Debug, Clone, Default)]
pub struct PaymentCreation {
    pub id: Option<String>,
    pub state: Option<String>,
    pub approval_url: Option<String>,
}

/// Result of a payment execution call.
#[derive(Debug, Clone, Default)]
pub struct PaymentExecution {
    pub id: Option<String>,
    /// Provider state, `"approved"` on success.
    pub state: String,
}

impl PaymentExecution {
    pub fn is_approved(&self) -> bool {
        self.state == "approved"
    }
}

/// Represents the result of a notification operation.
#[derive(Debug, Clone)]
pub struct NotificationResult {
    /// Provider message id, when one is returned.
    pub id: Option<String>,
    pub status: String,
}
