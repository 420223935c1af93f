// --- File: crates/services/payhandler_backend/src/lib.rs ---

pub mod app_state;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod service_factory;
pub mod workflow;

pub use app_state::{AppState, AppStateBuilder};
pub use router::{dispatch, Route};
pub use workflow::PaymentWorkflow;
