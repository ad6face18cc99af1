//! # Checkout Orchestrator
//!
//! [`CheckoutService`] sequences one checkout end to end:
//!
//! 1. validate the shipping address, and the billing address when it differs;
//! 2. validate stock for all cart lines in one call;
//! 3. transform the submission into an [`OrderCreationPayload`](crate::model::OrderCreationPayload);
//! 4. create the order (authenticated or guest);
//! 5. authenticated only: clear the shopper's cart, best effort.
//!
//! Steps run strictly one after another. A failure in steps 1-4 aborts the checkout with the
//! collaborator's error and nothing after it runs. A failure in step 5 is demoted to a
//! [`CleanupWarning`] inside the successful [`CheckoutOutcome`].
//!
//! The service holds only `Arc` handles to its collaborators, so one instance can serve any
//! number of concurrent checkouts.

pub mod error;
pub mod stage;

pub use error::*;
pub use stage::*;

use crate::address::{AddressError, AddressValidator};
use crate::backend::{AuthToken, OrderBackend};
use crate::inventory::InventoryChecker;
use crate::model::{CheckoutSubmission, OrderConfirmation};
use crate::transform::to_order_payload;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What happened to the shopper's server-side cart after the order was committed.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCleanup {
    Cleared,
    /// Guest checkouts have no server-side cart.
    Skipped,
    Failed(CleanupWarning),
}

/// A committed order plus the result of the best-effort cleanup.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
    pub confirmation: OrderConfirmation,
    pub cleanup: CartCleanup,
}

impl CheckoutOutcome {
    pub fn warning(&self) -> Option<&CleanupWarning> {
        match &self.cleanup {
            CartCleanup::Failed(warning) => Some(warning),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct CheckoutService {
    addresses: Arc<dyn AddressValidator>,
    inventory: Arc<dyn InventoryChecker>,
    backend: Arc<dyn OrderBackend>,
    observer: Arc<dyn StageObserver>,
}

impl CheckoutService {
    /// Creates a service that reports stage timings through [`TracingObserver`].
    pub fn new(
        addresses: Arc<dyn AddressValidator>,
        inventory: Arc<dyn InventoryChecker>,
        backend: Arc<dyn OrderBackend>,
    ) -> Self {
        Self {
            addresses,
            inventory,
            backend,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Checks out the cart of the shopper identified by `token`.
    #[instrument(skip_all, fields(kind = "authenticated", items = submission.items.len()))]
    pub async fn process_checkout(
        &self,
        submission: &CheckoutSubmission,
        token: &AuthToken,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let mut tracker = StageTracker::new(CheckoutKind::Authenticated, self.observer.as_ref());

        self.validate(&mut tracker, submission).await?;

        let payload = to_order_payload(submission, false);
        debug!(?payload, "Order payload built");
        let order = tracker
            .run(
                CheckoutStage::OrderSubmitting,
                self.backend.create_order(&payload, token),
            )
            .await?;

        let cleanup = match tracker
            .run_best_effort(CheckoutStage::CartClearing, self.backend.clear_cart(token))
            .await
        {
            Ok(()) => CartCleanup::Cleared,
            Err(e) => {
                let warning = CleanupWarning(e);
                warn!(order_number = %order.order_number, error = %warning, "Cart clearing failed");
                CartCleanup::Failed(warning)
            }
        };

        tracker.complete();
        info!(order_id = %order.id, order_number = %order.order_number, "Checkout completed");

        Ok(CheckoutOutcome {
            confirmation: order.into(),
            cleanup,
        })
    }

    /// Checks out a guest. The submission must carry a non-blank guest email.
    #[instrument(skip_all, fields(kind = "guest", items = submission.items.len()))]
    pub async fn process_guest_checkout(
        &self,
        submission: &CheckoutSubmission,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let mut tracker = StageTracker::new(CheckoutKind::Guest, self.observer.as_ref());

        if submission.guest_email().is_none() {
            tracker.fail();
            return Err(CheckoutError::missing_guest_email());
        }

        self.validate(&mut tracker, submission).await?;

        let payload = to_order_payload(submission, true);
        debug!(?payload, "Guest order payload built");
        let order = tracker
            .run(
                CheckoutStage::OrderSubmitting,
                self.backend.create_guest_order(&payload),
            )
            .await?;

        tracker.complete();
        info!(order_id = %order.id, order_number = %order.order_number, "Guest checkout completed");

        Ok(CheckoutOutcome {
            confirmation: order.into(),
            cleanup: CartCleanup::Skipped,
        })
    }

    async fn validate(
        &self,
        tracker: &mut StageTracker<'_>,
        submission: &CheckoutSubmission,
    ) -> Result<(), CheckoutError> {
        tracker
            .run(CheckoutStage::AddressValidating, self.validate_addresses(submission))
            .await?;
        tracker
            .run(
                CheckoutStage::InventoryChecking,
                self.inventory.validate_stock(&submission.items),
            )
            .await?;
        Ok(())
    }

    async fn validate_addresses(&self, submission: &CheckoutSubmission) -> Result<(), AddressError> {
        self.addresses.validate(&submission.shipping_address).await?;
        if !submission.billing_is_same_as_shipping {
            self.addresses.validate(&submission.billing_address).await?;
        }
        Ok(())
    }
}
