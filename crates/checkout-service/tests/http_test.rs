use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use checkout_core::backend::AuthToken;
use checkout_core::model::{CartLine, ProductId};
use checkout_service::lifecycle::CheckoutSystem;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

fn submission(product_id: ProductId, quantity: u32, guest_email: Option<&str>) -> Value {
    let mut body = json!({
        "shipping_address": {
            "first_name": "Alice",
            "last_name": "Smith",
            "address_line1": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "zip_code": "62701",
            "country": "USA"
        },
        "billing_same_as_shipping": true,
        "is_gift": false,
        "gift_wrap": false,
        "payment_method": "credit_card",
        "card_last_four": "4242",
        "card_brand": "visa",
        "items": [{
            "product_id": product_id.0,
            "product_name": "Widget",
            "product_price": 20.0,
            "quantity": quantity,
            "subtotal": 20.0 * f64::from(quantity)
        }],
        "subtotal": 20.0 * f64::from(quantity),
        "discount_amount": 0.0,
        "tax_amount": 0.0,
        "shipping_amount": 5.0,
        "total_amount": 20.0 * f64::from(quantity) + 5.0
    });
    if let Some(email) = guest_email {
        body["guest_email"] = json!(email);
    }
    body
}

fn post(uri: &str, token: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let system = CheckoutSystem::sandbox();

    let response = system
        .router()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "status": "healthy", "service": "checkout" })
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_requires_bearer_token() {
    let system = CheckoutSystem::sandbox();
    let body = submission(ProductId(1), 1, None).to_string();

    let response = system
        .router()
        .oneshot(post("/api/checkout/process", None, body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Authorization header required" })
    );

    let mut request = post("/api/checkout/process", None, body);
    request
        .headers_mut()
        .insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
    let response = system.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Invalid authorization header format" })
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let system = CheckoutSystem::sandbox();

    let response = system
        .router()
        .oneshot(post(
            "/api/guest-checkout/process",
            None,
            r#"{"guest_email": "a@b.c"}"#.to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid request body");
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_guest_checkout_without_email_is_rejected() {
    let system = CheckoutSystem::sandbox();
    let body = submission(ProductId(1), 1, None).to_string();

    let response = system
        .router()
        .oneshot(post("/api/guest-checkout/process", None, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "guest_email is required for guest checkout" })
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_authenticated_checkout_returns_confirmation() {
    let system = CheckoutSystem::sandbox();
    let sandbox = system.sandbox.clone().unwrap();
    let token = AuthToken::new("http-shopper");

    let price = Decimal::new(2000, 2);
    let widget = sandbox.add_product("Widget", price, 5).await.unwrap();
    sandbox
        .fill_cart(&token, vec![CartLine::new(widget, "Widget", price, 2, price * Decimal::TWO)])
        .await
        .unwrap();

    let body = submission(widget, 2, None).to_string();
    let response = system
        .router()
        .oneshot(post("/api/checkout/process", Some("http-shopper"), body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let confirmation = json_body(response).await;
    assert_eq!(confirmation["order_id"], 1);
    assert_eq!(confirmation["order_number"], "ORD-0001");
    assert_eq!(confirmation["status"], "pending");
    assert_eq!(confirmation["total"], 45.0);

    assert!(sandbox.cart(&token).await.unwrap().is_empty());

    drop(sandbox);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_stock_shortfall_is_bad_request() {
    let system = CheckoutSystem::sandbox();
    let sandbox = system.sandbox.clone().unwrap();
    let widget = sandbox
        .add_product("Widget", Decimal::new(2000, 2), 1)
        .await
        .unwrap();

    let body = submission(widget, 3, Some("guest@example.com")).to_string();
    let response = system
        .router()
        .oneshot(post("/api/guest-checkout/process", None, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|e| e.starts_with("Insufficient stock for Widget")));

    drop(sandbox);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cors_preflight_allows_known_origin() {
    let system = CheckoutSystem::sandbox();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/checkout/process")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = system.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );

    system.shutdown().await.unwrap();
}
