//! # Order Transformer
//!
//! Maps a [`CheckoutSubmission`] onto the backend's [`OrderCreationPayload`].
//!
//! The mapping is one-to-one: addresses are flattened, cart lines become order lines in the
//! same order, and every flag, payment field and amount is copied as declared. No I/O, no
//! arithmetic, no defaults invented for billing fields.

use crate::model::{CartLine, CheckoutSubmission, OrderCreationPayload, OrderLine};

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            product_price: line.price,
            quantity: line.quantity,
            subtotal: line.subtotal,
        }
    }
}

/// Builds the order-creation payload for a submission.
///
/// `guest_email` is carried over, trimmed, only when `is_guest` is set; an authenticated order
/// never names an email, the backend resolves the shopper from the bearer credential.
pub fn to_order_payload(submission: &CheckoutSubmission, is_guest: bool) -> OrderCreationPayload {
    let shipping = &submission.shipping_address;
    let billing = &submission.billing_address;

    OrderCreationPayload {
        guest_email: if is_guest {
            submission.guest_email().map(str::to_string)
        } else {
            None
        },

        shipping_first_name: shipping.first_name.clone(),
        shipping_last_name: shipping.last_name.clone(),
        shipping_address_line1: shipping.address_line1.clone(),
        shipping_address_line2: shipping.address_line2.clone(),
        shipping_city: shipping.city.clone(),
        shipping_state: shipping.state.clone(),
        shipping_zip_code: shipping.zip_code.clone(),
        shipping_country: shipping.country.clone(),
        shipping_phone: shipping.phone.clone(),

        billing_same_as_shipping: submission.billing_is_same_as_shipping,
        billing_first_name: billing.first_name.clone(),
        billing_last_name: billing.last_name.clone(),
        billing_address_line1: billing.address_line1.clone(),
        billing_address_line2: billing.address_line2.clone(),
        billing_city: billing.city.clone(),
        billing_state: billing.state.clone(),
        billing_zip_code: billing.zip_code.clone(),
        billing_country: billing.country.clone(),

        is_gift: submission.gift.is_gift,
        gift_message: submission.gift.gift_message.clone(),
        gift_wrap: submission.gift.gift_wrap,

        payment_method: submission.payment.payment_method.clone(),
        card_last_four: submission.payment.card_last_four.clone(),
        card_brand: submission.payment.card_brand.clone(),

        subtotal: submission.totals.subtotal,
        discount_amount: submission.totals.discount_amount,
        promo_code: submission.totals.promo_code.clone(),
        tax_amount: submission.totals.tax_amount,
        shipping_amount: submission.totals.shipping_amount,
        total_amount: submission.totals.total_amount,

        items: submission.items.iter().map(OrderLine::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, GiftOptions, OrderTotals, PaymentDetails};
    use rust_decimal::Decimal;

    fn address(first_name: &str) -> Address {
        Address {
            first_name: first_name.to_string(),
            last_name: "Lovelace".to_string(),
            address_line1: "12 Analytical Row".to_string(),
            address_line2: Some("Flat 3".to_string()),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip_code: "10001".to_string(),
            country: "UK".to_string(),
            phone: Some("555-0100".to_string()),
        }
    }

    fn submission() -> CheckoutSubmission {
        CheckoutSubmission {
            guest_email: Some("ada@example.com".to_string()),
            shipping_address: address("Ada"),
            billing_address: Address::default(),
            billing_is_same_as_shipping: true,
            gift: GiftOptions {
                is_gift: true,
                gift_message: Some("Happy birthday".to_string()),
                gift_wrap: false,
            },
            payment: PaymentDetails {
                payment_method: "credit_card".to_string(),
                card_last_four: Some("4242".to_string()),
                card_brand: Some("visa".to_string()),
            },
            items: vec![
                CartLine::new(42, "Widget", Decimal::new(2000, 2), 2, Decimal::new(4000, 2)),
                CartLine::new(7, "Gadget", Decimal::new(333, 2), 3, Decimal::new(999, 2)),
                CartLine::new(1, "Gizmo", Decimal::new(1, 2), 1, Decimal::new(1, 2)),
            ],
            totals: OrderTotals {
                subtotal: Decimal::new(5000, 2),
                discount_amount: Decimal::new(500, 2),
                promo_code: Some("SAVE5".to_string()),
                tax_amount: Decimal::new(360, 2),
                shipping_amount: Decimal::new(599, 2),
                total_amount: Decimal::new(5459, 2),
            },
        }
    }

    #[test]
    fn test_flattens_shipping_address() {
        let payload = to_order_payload(&submission(), false);

        assert_eq!(payload.shipping_first_name, "Ada");
        assert_eq!(payload.shipping_last_name, "Lovelace");
        assert_eq!(payload.shipping_address_line1, "12 Analytical Row");
        assert_eq!(payload.shipping_address_line2.as_deref(), Some("Flat 3"));
        assert_eq!(payload.shipping_city, "London");
        assert_eq!(payload.shipping_state, "LDN");
        assert_eq!(payload.shipping_zip_code, "10001");
        assert_eq!(payload.shipping_country, "UK");
        assert_eq!(payload.shipping_phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_billing_left_as_provided_when_same_as_shipping() {
        let payload = to_order_payload(&submission(), false);

        assert!(payload.billing_same_as_shipping);
        assert!(payload.billing_first_name.is_empty());
        assert!(payload.billing_address_line1.is_empty());
        assert!(payload.billing_address_line2.is_none());
        assert!(payload.billing_zip_code.is_empty());
    }

    #[test]
    fn test_separate_billing_address_is_copied() {
        let mut submission = submission();
        submission.billing_is_same_as_shipping = false;
        submission.billing_address = address("Charles");

        let payload = to_order_payload(&submission, false);

        assert!(!payload.billing_same_as_shipping);
        assert_eq!(payload.billing_first_name, "Charles");
        assert_eq!(payload.billing_city, "London");
        assert_eq!(payload.billing_address_line2.as_deref(), Some("Flat 3"));
    }

    #[test]
    fn test_guest_email_only_for_guests() {
        let submission = submission();

        assert_eq!(to_order_payload(&submission, false).guest_email, None);
        assert_eq!(
            to_order_payload(&submission, true).guest_email.as_deref(),
            Some("ada@example.com")
        );
    }

    #[test]
    fn test_guest_email_is_trimmed() {
        let mut padded = submission();
        padded.guest_email = Some("  ada@example.com\t".to_string());
        assert_eq!(
            to_order_payload(&padded, true).guest_email.as_deref(),
            Some("ada@example.com")
        );

        padded.guest_email = Some("   ".to_string());
        assert_eq!(to_order_payload(&padded, true).guest_email, None);
    }

    #[test]
    fn test_lines_and_totals_survive_unchanged() {
        let submission = submission();
        let payload = to_order_payload(&submission, true);

        assert_eq!(payload.items.len(), submission.items.len());
        for (line, order_line) in submission.items.iter().zip(&payload.items) {
            assert_eq!(order_line.product_id, line.product_id);
            assert_eq!(order_line.product_name, line.product_name);
            assert_eq!(order_line.product_price, line.price);
            assert_eq!(order_line.quantity, line.quantity);
            assert_eq!(order_line.subtotal, line.subtotal);
        }

        assert_eq!(payload.subtotal, submission.totals.subtotal);
        assert_eq!(payload.discount_amount, submission.totals.discount_amount);
        assert_eq!(payload.promo_code, submission.totals.promo_code);
        assert_eq!(payload.tax_amount, submission.totals.tax_amount);
        assert_eq!(payload.shipping_amount, submission.totals.shipping_amount);
        assert_eq!(payload.total_amount, submission.totals.total_amount);

        assert!(payload.is_gift);
        assert_eq!(payload.gift_message.as_deref(), Some("Happy birthday"));
        assert_eq!(payload.payment_method, "credit_card");
        assert_eq!(payload.card_last_four.as_deref(), Some("4242"));
        assert_eq!(payload.card_brand.as_deref(), Some("visa"));
    }

    #[test]
    fn test_declared_totals_are_not_recomputed() {
        let mut submission = submission();
        // Line subtotal disagrees with price x quantity; it must still pass through.
        submission.items[0].subtotal = Decimal::new(1, 0);
        submission.totals.total_amount = Decimal::new(123_456, 3);

        let payload = to_order_payload(&submission, false);

        assert_eq!(payload.items[0].subtotal, Decimal::new(1, 0));
        assert_eq!(payload.total_amount, Decimal::new(123_456, 3));
    }

    #[test]
    fn test_empty_cart_passes_through() {
        let mut submission = submission();
        submission.items.clear();

        assert!(to_order_payload(&submission, false).items.is_empty());
    }

    #[test]
    fn test_wire_form_omits_empty_billing_fields() {
        let payload = to_order_payload(&submission(), false);
        let json = serde_json::to_value(&payload).unwrap();

        assert!(json.get("guest_email").is_none());
        assert!(json.get("billing_first_name").is_none());
        assert_eq!(json["billing_same_as_shipping"], true);
        assert_eq!(json["items"][0]["product_price"], 20.0);
        assert_eq!(json["items"][0]["product_id"], 42);
    }
}
