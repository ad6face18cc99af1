//! Stock validation for a whole cart.

pub mod error;

pub use error::*;

use crate::backend::ProductCatalog;
use crate::model::CartLine;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Checks that every cart line can be fulfilled.
///
/// The check is batched and all-or-nothing: one failing line fails the whole cart.
#[async_trait]
pub trait InventoryChecker: Send + Sync {
    async fn validate_stock(&self, lines: &[CartLine]) -> Result<(), StockError>;
}

/// [`InventoryChecker`] that reads current stock from a [`ProductCatalog`].
///
/// Lines are checked in cart order and the first failure is returned. Nothing is reserved;
/// the backend reserves stock when it creates the order.
#[derive(Clone)]
pub struct CatalogInventoryChecker {
    catalog: Arc<dyn ProductCatalog>,
}

impl CatalogInventoryChecker {
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl InventoryChecker for CatalogInventoryChecker {
    #[instrument(skip_all, fields(lines = lines.len()))]
    async fn validate_stock(&self, lines: &[CartLine]) -> Result<(), StockError> {
        for line in lines {
            if line.quantity == 0 {
                return Err(StockError::InvalidQuantity(line.product_id));
            }

            let product = self
                .catalog
                .get_product(line.product_id)
                .await?
                .ok_or(StockError::UnknownProduct(line.product_id))?;

            if product.stock < line.quantity {
                return Err(StockError::Insufficient {
                    product_id: product.id,
                    product_name: product.name,
                    requested: line.quantity,
                    available: product.stock,
                });
            }

            debug!(
                product_id = %line.product_id,
                requested = line.quantity,
                available = product.stock,
                "Stock available"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::mock::MockProductCatalog;
    use crate::model::{Product, ProductId};
    use rust_decimal::Decimal;

    fn line(id: u32, quantity: u32) -> CartLine {
        CartLine::new(id, "Widget", Decimal::new(2000, 2), quantity, Decimal::new(2000, 2))
    }

    fn widget(id: u32, stock: u32) -> Product {
        Product::new(id, "Widget", Decimal::new(2000, 2), stock)
    }

    #[tokio::test]
    async fn test_all_lines_in_stock() {
        let catalog = MockProductCatalog::new();
        catalog.expect_get_product(1).return_ok(Some(widget(1, 5)));
        catalog.expect_get_product(2).return_ok(Some(widget(2, 2)));

        let checker = CatalogInventoryChecker::new(Arc::new(catalog.clone()));
        let result = checker.validate_stock(&[line(1, 5), line(2, 1)]).await;

        assert_eq!(result, Ok(()));
        catalog.verify();
    }

    #[tokio::test]
    async fn test_first_short_line_stops_the_check() {
        let catalog = MockProductCatalog::new();
        catalog.expect_get_product(1).return_ok(Some(widget(1, 1)));

        let checker = CatalogInventoryChecker::new(Arc::new(catalog.clone()));
        let result = checker.validate_stock(&[line(1, 3), line(2, 1)]).await;

        assert_eq!(
            result,
            Err(StockError::Insufficient {
                product_id: ProductId(1),
                product_name: "Widget".to_string(),
                requested: 3,
                available: 1,
            })
        );
        // Line 2 was never looked up.
        catalog.verify();
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let catalog = MockProductCatalog::new();
        catalog.expect_get_product(9).return_ok(None);

        let checker = CatalogInventoryChecker::new(Arc::new(catalog.clone()));
        let result = checker.validate_stock(&[line(9, 1)]).await;

        assert_eq!(result, Err(StockError::UnknownProduct(ProductId(9))));
    }

    #[tokio::test]
    async fn test_zero_quantity_is_rejected_without_lookup() {
        let catalog = MockProductCatalog::new();

        let checker = CatalogInventoryChecker::new(Arc::new(catalog.clone()));
        let result = checker.validate_stock(&[line(4, 0)]).await;

        assert_eq!(result, Err(StockError::InvalidQuantity(ProductId(4))));
        assert!(catalog.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_failure_is_a_lookup_error() {
        let catalog = MockProductCatalog::new();
        catalog
            .expect_get_product(1)
            .return_err(BackendError::Transport("connection reset".to_string()));

        let checker = CatalogInventoryChecker::new(Arc::new(catalog.clone()));
        let result = checker.validate_stock(&[line(1, 1)]).await;

        assert!(matches!(result, Err(StockError::Lookup(BackendError::Transport(_)))));
    }

    #[tokio::test]
    async fn test_empty_cart_passes() {
        let catalog = MockProductCatalog::new();
        let checker = CatalogInventoryChecker::new(Arc::new(catalog.clone()));

        assert_eq!(checker.validate_stock(&[]).await, Ok(()));
    }
}
