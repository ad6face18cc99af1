use checkout_core::tracing::setup_tracing;
use checkout_service::config::CheckoutConfig;
use checkout_service::lifecycle::{CheckoutSystem, StartupError};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    setup_tracing();

    let config = CheckoutConfig::from_env()?;
    let system = CheckoutSystem::from_config(&config)?;

    let listener = TcpListener::bind(config.socket_addr()).await?;
    info!(addr = %config.socket_addr(), backend = %config.backend_url, "Checkout service starting");

    axum::serve(listener, system.router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = system.shutdown().await {
        warn!(error = %e, "Shutdown did not complete cleanly");
    }
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down gracefully..."),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl+C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
