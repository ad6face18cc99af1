//! # Mock Collaborators & Testing Guide
//!
//! In-memory stand-ins for every collaborator the [`CheckoutService`](crate::checkout::CheckoutService)
//! talks to. Each mock works off an expectation queue: you declare the calls you expect, in
//! order, together with what each should return. A call with no matching expectation panics,
//! and [`verify`](MockOrderBackend::verify) panics if expectations were left unused.
//!
//! Every mock is cheap to clone and clones share state, so keep one handle in the test and
//! hand an `Arc` of a clone to the service.
//!
//! ## When to use Mocks vs the Sandbox Backend
//!
//! | Feature | Mocks | Sandbox backend |
//! |---------|-------|-----------------|
//! | **Speed** | Instant | Fast (spawns one actor task) |
//! | **Call assertions** | Exact (recorded payloads, tokens) | Observe state only |
//! | **Error injection** | Easy (`return_err`) | Only what real state produces |
//! | **Use case** | Orchestration logic and failure policy | Full-system flows |
//!
//! ## Example
//!
//! ```rust
//! use checkout_core::backend::{AuthToken, BackendError, OrderBackend};
//! use checkout_core::mock::MockOrderBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = MockOrderBackend::new();
//!     backend
//!         .expect_clear_cart()
//!         .return_err(BackendError::Transport("connection reset".to_string()));
//!
//!     let result = backend.clear_cart(&AuthToken::new("tok1")).await;
//!     assert!(matches!(result, Err(BackendError::Transport(_))));
//!
//!     assert_eq!(backend.cleared_carts(), vec![AuthToken::new("tok1")]);
//!     backend.verify();
//! }
//! ```

use crate::address::{AddressError, AddressValidator};
use crate::backend::{AuthToken, BackendError, OrderBackend, ProductCatalog};
use crate::inventory::{InventoryChecker, StockError};
use crate::model::{Address, CartLine, CreatedOrder, OrderCreationPayload, Product, ProductId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// =============================================================================
// EXPECTATION QUEUE
// =============================================================================

type Queue<K, T, E> = Arc<Mutex<VecDeque<(K, Result<T, E>)>>>;

/// Builder returned by every `expect_*` method.
///
/// The expectation is only queued once `return_ok` or `return_err` is called.
pub struct ExpectationBuilder<K, T, E> {
    key: K,
    queue: Queue<K, T, E>,
}

impl<K, T, E> ExpectationBuilder<K, T, E> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.queue.lock().unwrap().push_back((self.key, Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: E) {
        self.queue.lock().unwrap().push_back((self.key, Err(error)));
    }
}

fn expect<K, T, E>(queue: &Queue<K, T, E>, key: K) -> ExpectationBuilder<K, T, E> {
    ExpectationBuilder {
        key,
        queue: queue.clone(),
    }
}

fn next<K: PartialEq + Debug, T, E>(queue: &Queue<K, T, E>, call: &str, key: K) -> Result<T, E> {
    let expectation = queue.lock().unwrap().pop_front();
    match expectation {
        Some((expected, response)) if expected == key => response,
        Some((expected, _)) => panic!("Unexpected {call}: expected {expected:?}, got {key:?}"),
        None => panic!("Unexpected {call} call: no expectation set"),
    }
}

fn remaining<K, T, E>(queue: &Queue<K, T, E>) -> usize {
    queue.lock().unwrap().len()
}

fn assert_met(mock: &str, remaining: usize) {
    if remaining > 0 {
        panic!("Not all {mock} expectations were met. {remaining} remaining");
    }
}

// =============================================================================
// ADDRESS VALIDATOR
// =============================================================================

/// Mock [`AddressValidator`] that records every address it was asked about.
#[derive(Clone, Default)]
pub struct MockAddressValidator {
    expectations: Queue<(), (), AddressError>,
    validated: Arc<Mutex<Vec<Address>>>,
}

impl MockAddressValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one `validate` call.
    pub fn expect_validate(&self) -> ExpectationBuilder<(), (), AddressError> {
        expect(&self.expectations, ())
    }

    /// Addresses passed to `validate`, in call order.
    pub fn validated(&self) -> Vec<Address> {
        self.validated.lock().unwrap().clone()
    }

    pub fn verify(&self) {
        assert_met("address validator", remaining(&self.expectations));
    }
}

#[async_trait]
impl AddressValidator for MockAddressValidator {
    async fn validate(&self, address: &Address) -> Result<(), AddressError> {
        self.validated.lock().unwrap().push(address.clone());
        next(&self.expectations, "validate", ())
    }
}

// =============================================================================
// INVENTORY CHECKER
// =============================================================================

/// Mock [`InventoryChecker`] that records every batch of lines it was asked about.
#[derive(Clone, Default)]
pub struct MockInventoryChecker {
    expectations: Queue<(), (), StockError>,
    checked: Arc<Mutex<Vec<Vec<CartLine>>>>,
}

impl MockInventoryChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_validate_stock(&self) -> ExpectationBuilder<(), (), StockError> {
        expect(&self.expectations, ())
    }

    /// Line batches passed to `validate_stock`, in call order.
    pub fn checked(&self) -> Vec<Vec<CartLine>> {
        self.checked.lock().unwrap().clone()
    }

    pub fn verify(&self) {
        assert_met("inventory checker", remaining(&self.expectations));
    }
}

#[async_trait]
impl InventoryChecker for MockInventoryChecker {
    async fn validate_stock(&self, lines: &[CartLine]) -> Result<(), StockError> {
        self.checked.lock().unwrap().push(lines.to_vec());
        next(&self.expectations, "validate_stock", ())
    }
}

// =============================================================================
// ORDER BACKEND
// =============================================================================

/// Mock [`OrderBackend`] with one expectation queue per operation.
#[derive(Clone, Default)]
pub struct MockOrderBackend {
    create_order: Queue<(), CreatedOrder, BackendError>,
    create_guest_order: Queue<(), CreatedOrder, BackendError>,
    clear_cart: Queue<(), (), BackendError>,
    created: Arc<Mutex<Vec<(OrderCreationPayload, AuthToken)>>>,
    created_guest: Arc<Mutex<Vec<OrderCreationPayload>>>,
    cleared: Arc<Mutex<Vec<AuthToken>>>,
}

impl MockOrderBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_create_order(&self) -> ExpectationBuilder<(), CreatedOrder, BackendError> {
        expect(&self.create_order, ())
    }

    pub fn expect_create_guest_order(&self) -> ExpectationBuilder<(), CreatedOrder, BackendError> {
        expect(&self.create_guest_order, ())
    }

    pub fn expect_clear_cart(&self) -> ExpectationBuilder<(), (), BackendError> {
        expect(&self.clear_cart, ())
    }

    /// Payloads and credentials passed to `create_order`.
    pub fn created_orders(&self) -> Vec<(OrderCreationPayload, AuthToken)> {
        self.created.lock().unwrap().clone()
    }

    /// Payloads passed to `create_guest_order`.
    pub fn guest_orders(&self) -> Vec<OrderCreationPayload> {
        self.created_guest.lock().unwrap().clone()
    }

    /// Credentials passed to `clear_cart`.
    pub fn cleared_carts(&self) -> Vec<AuthToken> {
        self.cleared.lock().unwrap().clone()
    }

    pub fn verify(&self) {
        assert_met(
            "order backend",
            remaining(&self.create_order)
                + remaining(&self.create_guest_order)
                + remaining(&self.clear_cart),
        );
    }
}

#[async_trait]
impl OrderBackend for MockOrderBackend {
    async fn create_order(
        &self,
        payload: &OrderCreationPayload,
        token: &AuthToken,
    ) -> Result<CreatedOrder, BackendError> {
        self.created
            .lock()
            .unwrap()
            .push((payload.clone(), token.clone()));
        next(&self.create_order, "create_order", ())
    }

    async fn create_guest_order(
        &self,
        payload: &OrderCreationPayload,
    ) -> Result<CreatedOrder, BackendError> {
        self.created_guest.lock().unwrap().push(payload.clone());
        next(&self.create_guest_order, "create_guest_order", ())
    }

    async fn clear_cart(&self, token: &AuthToken) -> Result<(), BackendError> {
        self.cleared.lock().unwrap().push(token.clone());
        next(&self.clear_cart, "clear_cart", ())
    }
}

// =============================================================================
// PRODUCT CATALOG
// =============================================================================

/// Mock [`ProductCatalog`]. Expectations are keyed by product id and must arrive in order.
#[derive(Clone, Default)]
pub struct MockProductCatalog {
    expectations: Queue<ProductId, Option<Product>, BackendError>,
    lookups: Arc<Mutex<Vec<ProductId>>>,
}

impl MockProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_get_product(
        &self,
        id: impl Into<ProductId>,
    ) -> ExpectationBuilder<ProductId, Option<Product>, BackendError> {
        expect(&self.expectations, id.into())
    }

    /// Product ids looked up, in call order.
    pub fn lookups(&self) -> Vec<ProductId> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn verify(&self) {
        assert_met("product catalog", remaining(&self.expectations));
    }
}

#[async_trait]
impl ProductCatalog for MockProductCatalog {
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, BackendError> {
        self.lookups.lock().unwrap().push(id);
        next(&self.expectations, "get_product", id)
    }
}
