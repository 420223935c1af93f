// File: services/payhandler_backend/src/main.rs
use payhandler_backend::routes::routes;
use payhandler_backend::AppState;
use payhandler_common::logging;
use payhandler_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(load_config()?);
    logging::init_with_directive(
        config
            .log_level
            .as_deref()
            .unwrap_or(logging::DEFAULT_DIRECTIVE),
    );

    let app = routes(AppState::new(config.clone()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting PayHandler at http://{}", addr);
    info!("Gateway events accepted at http://{}/invoke", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
