use crate::model::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of the shopper's cart, snapshotted at checkout time.
///
/// `quantity` and `subtotal` are whatever the caller sent. They are never recomputed from
/// `price`; the order backend is the place that re-checks arithmetic if anything does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(rename = "product_price")]
    pub price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

impl CartLine {
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        price: Decimal,
        quantity: u32,
        subtotal: Decimal,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            price,
            quantity,
            subtotal,
        }
    }
}
