// --- File: crates/payhandler_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // Envelope rendering and the shared HTTP client
pub mod logging; // Logging utilities
pub mod models; // Wire shapes
pub mod services; // Service abstractions

pub use error::{external_service_error, Context, ErrorCode, PayHandlerError};

pub use http::client::{create_client, HTTP_CLIENT};

pub use models::{
    AccessToken, ErrorBody, GatewayEvent, PaymentCreatedBody, PaymentExecutionRequest,
    PaymentRequest, ResponseEnvelope,
};
