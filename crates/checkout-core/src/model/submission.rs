use crate::model::{Address, CartLine};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The full checkout request a shopper submits.
///
/// Covers both flows: an authenticated shopper leaves `guest_email` empty (identity travels
/// in the bearer credential), a guest must provide it.
///
/// # Trust boundary
/// Every monetary field in [`OrderTotals`] and every [`CartLine`] subtotal is taken as
/// declared. Nothing in this crate re-derives them from prices and quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    pub shipping_address: Address,
    #[serde(default)]
    pub billing_address: Address,
    #[serde(rename = "billing_same_as_shipping", default)]
    pub billing_is_same_as_shipping: bool,
    #[serde(flatten)]
    pub gift: GiftOptions,
    #[serde(flatten)]
    pub payment: PaymentDetails,
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[serde(flatten)]
    pub totals: OrderTotals,
}

impl CheckoutSubmission {
    /// The guest email, if one was given and is not blank.
    pub fn guest_email(&self) -> Option<&str> {
        self.guest_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

/// Gift flags and the optional card message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftOptions {
    #[serde(default)]
    pub is_gift: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gift_message: Option<String>,
    #[serde(default)]
    pub gift_wrap: bool,
}

/// Payment metadata only. The full card number and CVV never reach this service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    #[serde(default)]
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last_four: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_brand: Option<String>,
}

/// Caller-declared order totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    pub tax_amount: Decimal,
    pub shipping_amount: Decimal,
    pub total_amount: Decimal,
}
