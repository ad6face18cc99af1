use super::client::SandboxClient;
use super::message::{SandboxOrder, SandboxRequest};
use checkout_core::backend::BackendError;
use checkout_core::model::{
    CartLine, CreatedOrder, OrderCreationPayload, OrderId, Product, ProductId,
};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// In-memory order backend.
///
/// The actor owns products, carts and orders exclusively and handles one request at a time,
/// so stock reservation for a whole order is atomic without any locking.
pub struct SandboxActor {
    receiver: mpsc::Receiver<SandboxRequest>,
    products: HashMap<ProductId, Product>,
    carts: HashMap<String, Vec<CartLine>>,
    orders: HashMap<OrderId, SandboxOrder>,
    next_product_id: u32,
    next_order_id: u32,
    fail_cart_clears: bool,
}

impl SandboxActor {
    /// Creates the actor and its client. `buffer_size` bounds the request channel.
    pub fn new(buffer_size: usize) -> (Self, SandboxClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            products: HashMap::new(),
            carts: HashMap::new(),
            orders: HashMap::new(),
            next_product_id: 1,
            next_order_id: 1,
            fail_cart_clears: false,
        };
        (actor, SandboxClient::new(sender))
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        info!("Sandbox backend started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SandboxRequest::AddProduct {
                    name,
                    price,
                    stock,
                    respond_to,
                } => {
                    let id = ProductId(self.next_product_id);
                    self.next_product_id += 1;
                    self.products
                        .insert(id, Product::new(id, name, price, stock));
                    info!(product_id = %id, stock, "Product added");
                    let _ = respond_to.send(Ok(id));
                }
                SandboxRequest::GetProduct { id, respond_to } => {
                    let product = self.products.get(&id).cloned();
                    debug!(product_id = %id, found = product.is_some(), "Get product");
                    let _ = respond_to.send(Ok(product));
                }
                SandboxRequest::FillCart {
                    token,
                    lines,
                    respond_to,
                } => {
                    debug!(lines = lines.len(), "Fill cart");
                    self.carts.entry(token).or_default().extend(lines);
                    let _ = respond_to.send(Ok(()));
                }
                SandboxRequest::GetCart { token, respond_to } => {
                    let lines = self.carts.get(&token).cloned().unwrap_or_default();
                    let _ = respond_to.send(Ok(lines));
                }
                SandboxRequest::ClearCart { token, respond_to } => {
                    if self.fail_cart_clears {
                        warn!("Cart clear rejected (failure injection on)");
                        let _ = respond_to.send(Err(BackendError::Status {
                            status: 503,
                            body: "cart service unavailable".to_string(),
                        }));
                        continue;
                    }
                    let removed = self.carts.remove(&token).map(|l| l.len()).unwrap_or(0);
                    info!(removed, "Cart cleared");
                    let _ = respond_to.send(Ok(()));
                }
                SandboxRequest::CreateOrder {
                    payload,
                    token,
                    respond_to,
                } => {
                    let result = self.create_order(payload, token.is_some());
                    match &result {
                        Ok(order) => {
                            info!(order_id = %order.id, order_number = %order.order_number, "Order created")
                        }
                        Err(e) => warn!(error = %e, "Order rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                SandboxRequest::GetOrder { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.orders.get(&id).cloned()));
                }
                SandboxRequest::FailCartClears {
                    enabled,
                    respond_to,
                } => {
                    self.fail_cart_clears = enabled;
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(orders = self.orders.len(), "Sandbox backend stopped");
    }

    fn create_order(
        &mut self,
        payload: OrderCreationPayload,
        authenticated: bool,
    ) -> Result<CreatedOrder, BackendError> {
        if !authenticated && payload.guest_email.as_deref().map_or(true, str::is_empty) {
            return Err(BackendError::Status {
                status: 422,
                body: "guest_email is required".to_string(),
            });
        }

        // Same product may appear on several lines.
        let mut requested: HashMap<ProductId, u32> = HashMap::new();
        for line in &payload.items {
            *requested.entry(line.product_id).or_insert(0) += line.quantity;
        }

        for (id, quantity) in &requested {
            let product = self.products.get(id).ok_or_else(|| BackendError::Status {
                status: 404,
                body: format!("Product {id} not found"),
            })?;
            if product.stock < *quantity {
                return Err(BackendError::Status {
                    status: 409,
                    body: format!(
                        "Insufficient stock for {}. Requested: {}, Available: {}",
                        product.name, quantity, product.stock
                    ),
                });
            }
        }

        for (id, quantity) in &requested {
            if let Some(product) = self.products.get_mut(id) {
                product.stock -= quantity;
            }
        }

        let id = OrderId(self.next_order_id);
        self.next_order_id += 1;
        let order = CreatedOrder {
            id,
            order_number: format!("ORD-{:04}", id.0),
            status: "pending".to_string(),
            total_amount: payload.total_amount,
        };
        self.orders.insert(
            id,
            SandboxOrder {
                order: order.clone(),
                payload,
                authenticated,
            },
        );
        Ok(order)
    }
}
