//! Runs one authenticated and one guest checkout against the in-memory sandbox backend.
//!
//! ```bash
//! RUST_LOG=info cargo run --bin checkout-demo
//! ```

use checkout_core::backend::AuthToken;
use checkout_core::model::{
    Address, CartLine, CheckoutSubmission, GiftOptions, OrderTotals, PaymentDetails,
};
use checkout_core::tracing::setup_tracing;
use checkout_service::lifecycle::CheckoutSystem;
use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

fn address() -> Address {
    Address {
        first_name: "Alice".to_string(),
        last_name: "Smith".to_string(),
        address_line1: "1 Main St".to_string(),
        address_line2: None,
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: "62701".to_string(),
        country: "USA".to_string(),
        phone: None,
    }
}

fn submission(items: Vec<CartLine>, guest_email: Option<&str>) -> CheckoutSubmission {
    let subtotal: Decimal = items.iter().map(|line| line.subtotal).sum();
    let tax = (subtotal * Decimal::new(8, 2)).round_dp(2);
    let shipping = Decimal::new(599, 2);

    CheckoutSubmission {
        guest_email: guest_email.map(str::to_string),
        shipping_address: address(),
        billing_address: Address::default(),
        billing_is_same_as_shipping: true,
        gift: GiftOptions::default(),
        payment: PaymentDetails {
            payment_method: "credit_card".to_string(),
            card_last_four: Some("4242".to_string()),
            card_brand: Some("visa".to_string()),
        },
        items,
        totals: OrderTotals {
            subtotal,
            discount_amount: Decimal::ZERO,
            promo_code: None,
            tax_amount: tax,
            shipping_amount: shipping,
            total_amount: subtotal + tax + shipping,
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting checkout demo against the sandbox backend");
    let system = CheckoutSystem::sandbox();
    let sandbox = system
        .sandbox
        .clone()
        .ok_or_else(|| "sandbox system has no sandbox client".to_string())?;

    let price = Decimal::new(2000, 2);
    let widget = sandbox
        .add_product("Super Widget", price, 10)
        .await
        .map_err(|e| e.to_string())?;
    info!(product_id = %widget, "Product seeded");

    // Authenticated checkout: the cart lives server-side and is cleared afterwards
    let token = AuthToken::new("demo-token");
    let lines = vec![CartLine::new(widget, "Super Widget", price, 2, price * Decimal::from(2))];
    sandbox
        .fill_cart(&token, lines.clone())
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("authenticated_checkout");
    let result = async {
        info!("Processing authenticated checkout");
        system
            .service
            .process_checkout(&submission(lines, None), &token)
            .await
    }
    .instrument(span)
    .await;

    match result {
        Ok(outcome) => info!(
            order_number = %outcome.confirmation.order_number,
            total = %outcome.confirmation.total,
            cleanup = ?outcome.cleanup,
            "Authenticated checkout succeeded"
        ),
        Err(e) => error!(error = %e, "Authenticated checkout failed"),
    }

    // Guest checkout: no server-side cart
    let span = tracing::info_span!("guest_checkout");
    let guest_lines = vec![CartLine::new(widget, "Super Widget", price, 1, price)];
    let result = async {
        info!("Processing guest checkout");
        system
            .service
            .process_guest_checkout(&submission(guest_lines, Some("guest@example.com")))
            .await
    }
    .instrument(span)
    .await;

    match result {
        Ok(outcome) => info!(
            order_number = %outcome.confirmation.order_number,
            total = %outcome.confirmation.total,
            "Guest checkout succeeded"
        ),
        Err(e) => error!(error = %e, "Guest checkout failed"),
    }

    // Asking for more than is left fails the stock check before any order is created
    let span = tracing::info_span!("oversized_checkout");
    let too_many = vec![CartLine::new(widget, "Super Widget", price, 50, price * Decimal::from(50))];
    let result = system
        .service
        .process_guest_checkout(&submission(too_many, Some("guest@example.com")))
        .instrument(span)
        .await;
    if let Err(e) = result {
        info!(error = %e, "Oversized checkout rejected as expected");
    }

    let remaining = sandbox
        .cart(&token)
        .await
        .map_err(|e| e.to_string())?;
    info!(cart_lines = remaining.len(), "Server-side cart after checkout");

    drop(sandbox);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
