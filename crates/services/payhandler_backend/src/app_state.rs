// --- File: crates/services/payhandler_backend/src/app_state.rs ---
use payhandler_common::services::ServiceFactory;
use payhandler_config::AppConfig;
use std::sync::Arc;

use crate::service_factory::PayHandlerServiceFactory;
use crate::workflow::PaymentWorkflow;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service_factory: Arc<dyn ServiceFactory>,
}

/// Builder for AppState. Tests use it to install fake services.
pub struct AppStateBuilder {
    config: Arc<AppConfig>,
    service_factory: Option<Arc<dyn ServiceFactory>>,
}

impl AppStateBuilder {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            service_factory: None,
        }
    }

    pub fn with_service_factory(mut self, service_factory: Arc<dyn ServiceFactory>) -> Self {
        self.service_factory = Some(service_factory);
        self
    }

    /// Build the AppState. Without an explicit factory the PayPal/mail
    /// factory is built from the config.
    pub fn build(self) -> AppState {
        let service_factory = match self.service_factory {
            Some(factory) => factory,
            None => Arc::new(PayHandlerServiceFactory::new(self.config.clone())),
        };

        AppState {
            config: self.config,
            service_factory,
        }
    }
}

impl AppState {
    pub fn builder(config: Arc<AppConfig>) -> AppStateBuilder {
        AppStateBuilder::new(config)
    }

    pub fn new(config: Arc<AppConfig>) -> Self {
        AppStateBuilder::new(config).build()
    }

    /// Workflow bound to the factory's current services.
    pub fn workflow(&self) -> PaymentWorkflow {
        PaymentWorkflow::from_factory(self.service_factory.as_ref())
    }
}
