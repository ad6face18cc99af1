use crate::model::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for orders created by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The canonical order-creation request sent to the order backend.
///
/// Addresses are flattened into `shipping_*` / `billing_*` fields. Billing fields that were
/// left empty (the usual case when billing mirrors shipping) are omitted from the wire form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCreationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,

    pub shipping_first_name: String,
    pub shipping_last_name: String,
    pub shipping_address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_line2: Option<String>,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_zip_code: String,
    pub shipping_country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_phone: Option<String>,

    pub billing_same_as_shipping: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub billing_first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub billing_last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub billing_address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address_line2: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub billing_city: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub billing_state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub billing_zip_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub billing_country: String,

    pub is_gift: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_message: Option<String>,
    pub gift_wrap: bool,

    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last_four: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_brand: Option<String>,

    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    pub tax_amount: Decimal,
    pub shipping_amount: Decimal,
    pub total_amount: Decimal,

    pub items: Vec<OrderLine>,
}

/// One line of an order-creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// What the order backend reports after committing an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub id: OrderId,
    pub order_number: String,
    pub status: String,
    pub total_amount: Decimal,
}

/// The checkout result returned to the caller: the backend's [`CreatedOrder`], re-keyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub order_number: String,
    pub status: String,
    pub total: Decimal,
}

impl From<CreatedOrder> for OrderConfirmation {
    fn from(order: CreatedOrder) -> Self {
        Self {
            order_id: order.id,
            order_number: order.order_number,
            status: order.status,
            total: order.total_amount,
        }
    }
}
