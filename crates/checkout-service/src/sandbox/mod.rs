//! # Sandbox Backend
//!
//! An in-memory order backend that runs as a single Tokio actor. It stands in for the real
//! order service in the demo binary and in full-system tests.
//!
//! ## Structure
//!
//! - [`SandboxActor`] - Owns products, carts keyed by bearer token, and orders
//! - [`SandboxClient`] - Cloneable handle; implements [`OrderBackend`](checkout_core::backend::OrderBackend)
//!   and [`ProductCatalog`](checkout_core::backend::ProductCatalog)
//! - [`SandboxRequest`] - The message protocol between the two
//!
//! ## Behavior
//!
//! - Order creation reserves stock for every line at once. If any product is short, nothing
//!   is reserved and the request fails with status 409; unknown products fail with 404.
//! - Orders are numbered `ORD-0001`, `ORD-0002`, ... and start out `pending`.
//! - Guest orders must carry a guest email (status 422 otherwise).
//! - Clearing an unknown cart succeeds.
//! - Once every client is dropped the actor stops; later calls fail with
//!   `BackendError::Unavailable`.
//!
//! ## Usage
//!
//! ```rust
//! use checkout_service::sandbox::SandboxActor;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = SandboxActor::new(32);
//!     let handle = tokio::spawn(actor.run());
//!
//!     let id = client.add_product("Widget", Decimal::new(2000, 2), 10).await.unwrap();
//!     assert_eq!(id.0, 1);
//!
//!     drop(client);
//!     handle.await.unwrap();
//! }
//! ```

pub mod actor;
pub mod client;
pub mod message;

pub use actor::*;
pub use client::*;
pub use message::*;

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::backend::{AuthToken, BackendError, OrderBackend, ProductCatalog};
    use checkout_core::model::{OrderCreationPayload, OrderLine, ProductId};
    use rust_decimal::Decimal;

    fn payload(lines: &[(u32, u32)], guest_email: Option<&str>) -> OrderCreationPayload {
        OrderCreationPayload {
            guest_email: guest_email.map(str::to_string),
            shipping_first_name: "Alice".to_string(),
            shipping_last_name: "Smith".to_string(),
            shipping_address_line1: "1 Main St".to_string(),
            shipping_address_line2: None,
            shipping_city: "Springfield".to_string(),
            shipping_state: "IL".to_string(),
            shipping_zip_code: "62701".to_string(),
            shipping_country: "USA".to_string(),
            shipping_phone: None,
            billing_same_as_shipping: true,
            billing_first_name: String::new(),
            billing_last_name: String::new(),
            billing_address_line1: String::new(),
            billing_address_line2: None,
            billing_city: String::new(),
            billing_state: String::new(),
            billing_zip_code: String::new(),
            billing_country: String::new(),
            is_gift: false,
            gift_message: None,
            gift_wrap: false,
            payment_method: "credit_card".to_string(),
            card_last_four: None,
            card_brand: None,
            subtotal: Decimal::new(1000, 2),
            discount_amount: Decimal::ZERO,
            promo_code: None,
            tax_amount: Decimal::ZERO,
            shipping_amount: Decimal::ZERO,
            total_amount: Decimal::new(1000, 2),
            items: lines
                .iter()
                .map(|&(id, quantity)| OrderLine {
                    product_id: ProductId(id),
                    product_name: "Widget".to_string(),
                    product_price: Decimal::new(500, 2),
                    quantity,
                    subtotal: Decimal::new(500, 2) * Decimal::from(quantity),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_order_reserves_stock_and_is_numbered() {
        let (actor, client) = SandboxActor::new(8);
        let handle = tokio::spawn(actor.run());

        let id = client
            .add_product("Widget", Decimal::new(500, 2), 5)
            .await
            .unwrap();
        let order = client
            .create_order(&payload(&[(id.0, 2)], None), &AuthToken::new("tok1"))
            .await
            .unwrap();

        assert_eq!(order.order_number, "ORD-0001");
        assert_eq!(order.status, "pending");
        assert_eq!(order.total_amount, Decimal::new(1000, 2));
        assert_eq!(client.get_product(id).await.unwrap().unwrap().stock, 3);

        let stored = client.order(order.id).await.unwrap().unwrap();
        assert!(stored.authenticated);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_shortfall_reserves_nothing() {
        let (actor, client) = SandboxActor::new(8);
        let handle = tokio::spawn(actor.run());

        let a = client.add_product("A", Decimal::ONE, 5).await.unwrap();
        let b = client.add_product("B", Decimal::ONE, 1).await.unwrap();

        let result = client
            .create_order(&payload(&[(a.0, 2), (b.0, 2)], None), &AuthToken::new("tok1"))
            .await;

        assert!(matches!(result, Err(BackendError::Status { status: 409, .. })));
        assert_eq!(client.get_product(a).await.unwrap().unwrap().stock, 5);
        assert_eq!(client.get_product(b).await.unwrap().unwrap().stock, 1);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_repeated_product_lines_are_summed() {
        let (actor, client) = SandboxActor::new(8);
        let handle = tokio::spawn(actor.run());

        let a = client.add_product("A", Decimal::ONE, 3).await.unwrap();
        let result = client
            .create_order(&payload(&[(a.0, 2), (a.0, 2)], None), &AuthToken::new("tok1"))
            .await;

        assert!(matches!(result, Err(BackendError::Status { status: 409, .. })));

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_guest_order_requires_email() {
        let (actor, client) = SandboxActor::new(8);
        let handle = tokio::spawn(actor.run());

        let a = client.add_product("A", Decimal::ONE, 3).await.unwrap();

        let rejected = client.create_guest_order(&payload(&[(a.0, 1)], None)).await;
        assert!(matches!(rejected, Err(BackendError::Status { status: 422, .. })));

        let order = client
            .create_guest_order(&payload(&[(a.0, 1)], Some("a@b.com")))
            .await
            .unwrap();
        let stored = client.order(order.id).await.unwrap().unwrap();
        assert!(!stored.authenticated);
        assert_eq!(stored.payload.guest_email.as_deref(), Some("a@b.com"));

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_cart_clearing() {
        let (actor, client) = SandboxActor::new(8);
        let handle = tokio::spawn(actor.run());
        let token = AuthToken::new("tok1");

        client
            .fill_cart(
                &token,
                vec![checkout_core::model::CartLine::new(
                    1,
                    "A",
                    Decimal::ONE,
                    1,
                    Decimal::ONE,
                )],
            )
            .await
            .unwrap();
        assert_eq!(client.cart(&token).await.unwrap().len(), 1);

        client.fail_cart_clears(true).await.unwrap();
        assert!(matches!(
            client.clear_cart(&token).await,
            Err(BackendError::Status { status: 503, .. })
        ));
        assert_eq!(client.cart(&token).await.unwrap().len(), 1);

        client.fail_cart_clears(false).await.unwrap();
        client.clear_cart(&token).await.unwrap();
        assert!(client.cart(&token).await.unwrap().is_empty());

        // Unknown carts clear fine.
        client.clear_cart(&AuthToken::new("nobody")).await.unwrap();

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_stopped_actor_is_unavailable() {
        let (actor, client) = SandboxActor::new(8);
        drop(actor);

        assert!(matches!(
            client.get_product(ProductId(1)).await,
            Err(BackendError::Unavailable(_))
        ));
    }
}
