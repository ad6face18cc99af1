//! # Checkout Stages
//!
//! Every checkout walks the same state machine:
//!
//! ```text
//! Received -> AddressValidating -> InventoryChecking -> OrderSubmitting -> CartClearing -> Completed
//!                                                                 \-----------(guest)-----------/
//! ```
//!
//! Any stage up to and including `OrderSubmitting` may fall through to `Failed`. `CartClearing`
//! never fails the checkout: its failure is reported as [`StageStatus::Absorbed`] and the
//! workflow still reaches `Completed`.
//!
//! Each finished stage is reported to a [`StageObserver`] as a [`StageEvent`] carrying its
//! wall-clock duration. [`TracingObserver`] logs them; [`RecordingObserver`] keeps them for
//! assertions.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutStage {
    Received,
    AddressValidating,
    InventoryChecking,
    OrderSubmitting,
    CartClearing,
    Completed,
    Failed,
}

impl CheckoutStage {
    /// Transition table of the checkout state machine.
    pub fn can_advance_to(self, next: CheckoutStage) -> bool {
        use CheckoutStage::*;
        matches!(
            (self, next),
            (Received, AddressValidating)
                | (AddressValidating, InventoryChecking)
                | (InventoryChecking, OrderSubmitting)
                | (OrderSubmitting, CartClearing)
                | (OrderSubmitting, Completed)
                | (CartClearing, Completed)
                | (Received, Failed)
                | (AddressValidating, Failed)
                | (InventoryChecking, Failed)
                | (OrderSubmitting, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CheckoutStage::Completed | CheckoutStage::Failed)
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutStage::Received => "received",
            CheckoutStage::AddressValidating => "address_validating",
            CheckoutStage::InventoryChecking => "inventory_checking",
            CheckoutStage::OrderSubmitting => "order_submitting",
            CheckoutStage::CartClearing => "cart_clearing",
            CheckoutStage::Completed => "completed",
            CheckoutStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Which entry point a checkout came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutKind {
    Authenticated,
    Guest,
}

impl fmt::Display for CheckoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutKind::Authenticated => f.write_str("authenticated"),
            CheckoutKind::Guest => f.write_str("guest"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Succeeded,
    Failed,
    /// The stage failed but the checkout carried on.
    Absorbed,
}

/// One finished stage. Terminal stages are reported with the total elapsed time.
#[derive(Debug, Clone, PartialEq)]
pub struct StageEvent {
    pub kind: CheckoutKind,
    pub stage: CheckoutStage,
    pub status: StageStatus,
    pub elapsed: Duration,
}

pub trait StageObserver: Send + Sync {
    fn on_stage(&self, event: &StageEvent);
}

/// Logs stage events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StageObserver for TracingObserver {
    fn on_stage(&self, event: &StageEvent) {
        let elapsed_ms = event.elapsed.as_secs_f64() * 1000.0;
        match event.status {
            StageStatus::Succeeded => info!(
                kind = %event.kind,
                stage = %event.stage,
                elapsed_ms,
                "Checkout stage finished"
            ),
            StageStatus::Failed | StageStatus::Absorbed => warn!(
                kind = %event.kind,
                stage = %event.stage,
                status = ?event.status,
                elapsed_ms,
                "Checkout stage did not succeed"
            ),
        }
    }
}

/// Keeps every event in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<StageEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StageEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// The sequence of stages seen, in order.
    pub fn stages(&self) -> Vec<CheckoutStage> {
        self.events().into_iter().map(|e| e.stage).collect()
    }
}

impl StageObserver for RecordingObserver {
    fn on_stage(&self, event: &StageEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Drives one checkout through its stages and reports each to the observer.
pub(crate) struct StageTracker<'a> {
    kind: CheckoutKind,
    observer: &'a dyn StageObserver,
    current: CheckoutStage,
    started: Instant,
}

impl<'a> StageTracker<'a> {
    pub(crate) fn new(kind: CheckoutKind, observer: &'a dyn StageObserver) -> Self {
        Self {
            kind,
            observer,
            current: CheckoutStage::Received,
            started: Instant::now(),
        }
    }

    /// Runs `work` as `stage`. On error the checkout moves to `Failed`.
    pub(crate) async fn run<T, E, F>(&mut self, stage: CheckoutStage, work: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        self.advance(stage);
        let stage_started = Instant::now();
        let result = work.await;
        let status = if result.is_ok() {
            StageStatus::Succeeded
        } else {
            StageStatus::Failed
        };
        self.emit(stage, status, stage_started.elapsed());
        if result.is_err() {
            self.fail();
        }
        result
    }

    /// Runs `work` as `stage`; an error is reported as absorbed and handed back to the caller.
    pub(crate) async fn run_best_effort<T, E, F>(&mut self, stage: CheckoutStage, work: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        self.advance(stage);
        let stage_started = Instant::now();
        let result = work.await;
        let status = if result.is_ok() {
            StageStatus::Succeeded
        } else {
            StageStatus::Absorbed
        };
        self.emit(stage, status, stage_started.elapsed());
        result
    }

    pub(crate) fn fail(&mut self) {
        self.advance(CheckoutStage::Failed);
        self.emit(CheckoutStage::Failed, StageStatus::Failed, self.started.elapsed());
    }

    pub(crate) fn complete(&mut self) {
        self.advance(CheckoutStage::Completed);
        self.emit(CheckoutStage::Completed, StageStatus::Succeeded, self.started.elapsed());
    }

    fn advance(&mut self, next: CheckoutStage) {
        debug_assert!(
            self.current.can_advance_to(next),
            "illegal checkout transition {} -> {}",
            self.current,
            next
        );
        self.current = next;
    }

    fn emit(&self, stage: CheckoutStage, status: StageStatus, elapsed: Duration) {
        self.observer.on_stage(&StageEvent {
            kind: self.kind,
            stage,
            status,
            elapsed,
        });
    }
}
