//! Catalog browsing and product pages, end to end.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use serde_json::json;

use hstore_integration_tests::{CUSTOMER_COOKIE, TestApp, location};

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;
    let resp = app.get("/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_empty_catalog_renders_empty_listing() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::GET,
        "/products",
        StatusCode::BAD_REQUEST,
        json!({"message": "No products in catalog"}),
    );

    for path in ["/", "/products"] {
        let resp = app.get(path, None).await;
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
        let body = resp.text().await.unwrap();
        assert!(body.contains("No products available at the moment."), "{path}");
    }
}

#[tokio::test]
async fn test_other_catalog_errors_render_error_page() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::GET,
        "/products",
        StatusCode::BAD_REQUEST,
        json!({"message": "Something else"}),
    );

    let resp = app.get("/products", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.text().await.unwrap().contains("Something else"));
}

#[tokio::test]
async fn test_listing_shows_products() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::GET,
        "/products",
        StatusCode::OK,
        json!([
            {"productId": 1, "productName": "Notebook", "price": 45.5,
             "category": "BOOKS", "status": "AVAILABLE"},
            {"productId": 2, "productName": "Desk Lamp", "price": 999,
             "category": "FURNITURE", "status": "OUTOFSTOCK"}
        ]),
    );

    let resp = app.get("/products", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Notebook"));
    assert!(body.contains("₹45.50"));
    assert!(body.contains("/products/2"));
    assert!(body.contains("outofstock"));
    assert_eq!(
        resp_cache_control(&app, "/products").await.as_deref(),
        Some("no-store, max-age=0")
    );
}

async fn resp_cache_control(app: &TestApp, path: &str) -> Option<String> {
    app.get(path, None)
        .await
        .headers()
        .get("cache-control")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

#[tokio::test]
async fn test_product_detail_attaches_token_when_logged_in() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::GET,
        "/product/7",
        StatusCode::OK,
        json!({"productId": 7, "productName": "Mug", "price": 120, "manufacturer": "Acme"}),
    );

    let resp = app.get("/products/7", Some(CUSTOMER_COOKIE)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Mug"));
    assert!(body.contains("Acme"));

    let calls = app.api.calls_to(&Method::GET, "/product/7");
    assert_eq!(calls[0].token.as_deref(), Some("customer-token"));
}

#[tokio::test]
async fn test_product_detail_without_product_id_shows_message() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::GET,
        "/product/9",
        StatusCode::NOT_FOUND,
        json!({"message": "Product not found with id 9"}),
    );

    let resp = app.get("/products/9", None).await;
    let body = resp.text().await.unwrap();
    assert!(body.contains("Error loading product"));
    assert!(body.contains("Product not found with id 9"));
    assert!(body.contains("Back to products"));
}

#[tokio::test]
async fn test_product_detail_unexpected_shape_reports_status() {
    let app = TestApp::spawn().await;
    app.api
        .stub(Method::GET, "/product/5", StatusCode::OK, json!({"name": "?"}));

    let body = app.get("/products/5", None).await.text().await.unwrap();
    assert!(body.contains("Unexpected response (status 200)"));
}

#[tokio::test]
async fn test_add_to_cart_posts_single_unit() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::GET,
        "/product/7",
        StatusCode::OK,
        json!({"productId": 7, "productName": "Mug", "price": 120}),
    );
    app.api.stub(
        Method::POST,
        "/cart/add",
        StatusCode::OK,
        json!({"cartItems": [], "cartTotal": 120}),
    );

    let resp = app
        .post_form("/products/7/cart", Some(CUSTOMER_COOKIE), &[])
        .await;
    assert_eq!(location(&resp), "/cart");

    let calls = app.api.calls_to(&Method::POST, "/cart/add");
    assert_eq!(calls[0].token.as_deref(), Some("customer-token"));
    assert_eq!(
        calls[0].body,
        Some(json!({"productId": 7, "productName": "Mug", "price": 120.0, "quantity": 1}))
    );
}

#[tokio::test]
async fn test_add_to_cart_requires_login() {
    let app = TestApp::spawn().await;
    let resp = app.post_form("/products/7/cart", None, &[]).await;
    assert_eq!(location(&resp), "/login/customer");
    assert!(app.api.calls().is_empty());
}
