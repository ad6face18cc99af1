//! # System Lifecycle
//!
//! [`CheckoutSystem`] wires concrete collaborators into a [`CheckoutService`] and owns any
//! background tasks they need.
//!
//! - [`CheckoutSystem::from_config`] talks to a real order backend (and a remote address
//!   validator when one is configured). No tasks are spawned.
//! - [`CheckoutSystem::sandbox`] spawns the in-memory [`SandboxActor`] and points every
//!   collaborator at it.
//!
//! ## Graceful Shutdown
//!
//! [`CheckoutSystem::shutdown`] drops the system's handles and awaits the spawned tasks. The
//! sandbox actor stops once the last [`SandboxClient`] is gone, so any router built from the
//! system must be dropped first (`axum::serve` drops it when it returns).

use crate::clients::{BackendClient, HttpAddressValidator};
use crate::config::{default_allowed_origins, CheckoutConfig, ConfigError};
use crate::routes::{self, AppState};
use crate::sandbox::{SandboxActor, SandboxClient};
use axum::Router;
use checkout_core::address::{AddressError, AddressValidator, LocalAddressValidator};
use checkout_core::backend::BackendError;
use checkout_core::inventory::CatalogInventoryChecker;
use checkout_core::CheckoutService;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Errors raised while starting or running the service.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build order backend client: {0}")]
    Backend(#[from] BackendError),

    #[error("Failed to build address validator client: {0}")]
    Validator(#[from] AddressError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct CheckoutSystem {
    pub service: CheckoutService,

    /// Present only for sandbox systems; used to seed products and carts.
    pub sandbox: Option<SandboxClient>,

    allowed_origins: Vec<String>,

    /// Task handles for spawned actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl CheckoutSystem {
    /// Builds a system backed by the HTTP collaborators named in `config`.
    ///
    /// # Errors
    ///
    /// Returns `StartupError` if an HTTP client fails to build.
    pub fn from_config(config: &CheckoutConfig) -> Result<Self, StartupError> {
        let backend = Arc::new(BackendClient::new(
            config.backend_url.clone(),
            config.backend_timeout,
        )?);

        let addresses: Arc<dyn AddressValidator> = match &config.validator_url {
            Some(url) => {
                info!(url = %url, "Using remote address validator");
                Arc::new(HttpAddressValidator::new(url.clone(), config.validator_timeout)?)
            }
            None => {
                info!("No address validator configured, applying local rules only");
                Arc::new(LocalAddressValidator)
            }
        };

        let inventory = Arc::new(CatalogInventoryChecker::new(backend.clone()));
        let service = CheckoutService::new(addresses, inventory, backend);

        Ok(Self {
            service,
            sandbox: None,
            allowed_origins: config.allowed_origins.clone(),
            handles: Vec::new(),
        })
    }

    /// Builds a self-contained system around a freshly spawned sandbox backend.
    pub fn sandbox() -> Self {
        let (actor, client) = SandboxActor::new(64);
        let handle = tokio::spawn(actor.run());

        let backend = Arc::new(client.clone());
        let inventory = Arc::new(CatalogInventoryChecker::new(backend.clone()));
        let service = CheckoutService::new(Arc::new(LocalAddressValidator), inventory, backend);

        Self {
            service,
            sandbox: Some(client),
            allowed_origins: default_allowed_origins(),
            handles: vec![handle],
        }
    }

    /// Builds the HTTP application for this system.
    pub fn router(&self) -> Router {
        routes::router(
            AppState {
                checkout: self.service.clone(),
            },
            &self.allowed_origins,
        )
    }

    /// Gracefully shuts down the system.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all spawned tasks finished cleanly
    /// - `Err(String)` if any task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down checkout system...");

        // Dropping every handle closes the sandbox channel.
        drop(self.service);
        drop(self.sandbox);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Task failed: {:?}", e);
                return Err(format!("Task failed: {:?}", e));
            }
        }

        info!("Checkout system shutdown complete.");
        Ok(())
    }
}
