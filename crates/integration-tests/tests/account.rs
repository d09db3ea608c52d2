//! Registration and customer account pages, end to end.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use serde_json::json;

use hstore_integration_tests::{CUSTOMER_COOKIE, TestApp, location, set_cookies};

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_customer_registration_shows_new_id_and_refreshes_to_login() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::POST,
        "/register/customer",
        StatusCode::OK,
        json!({"customerId": 42, "firstName": "Asha"}),
    );

    let resp = app
        .post_form(
            "/register/customer",
            None,
            &[
                ("first_name", "Asha"),
                ("last_name", "Rao"),
                ("email", "asha@example.com"),
                ("mobile", "9999999999"),
                ("password", "secret"),
            ],
        )
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(set_cookies(&resp).is_empty());
    let body = resp.text().await.unwrap();
    assert!(body.contains("<strong>42</strong>"));
    assert!(body.contains("http-equiv=\"refresh\" content=\"2; url="));
    assert!(body.contains("Log in now"));

    let calls = app.api.calls_to(&Method::POST, "/register/customer");
    assert_eq!(calls[0].token, None);
    assert_eq!(
        calls[0].body,
        Some(json!({
            "firstName": "Asha",
            "lastName": "Rao",
            "password": "secret",
            "mobileNo": "9999999999",
            "emailId": "asha@example.com"
        }))
    );
}

#[tokio::test]
async fn test_seller_registration_sends_mobile_field() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::POST,
        "/register/seller",
        StatusCode::OK,
        json!({"sellerId": 5}),
    );

    let resp = app
        .post_form(
            "/register/seller",
            None,
            &[
                ("first_name", "Ravi"),
                ("last_name", "Kumar"),
                ("email", "ravi@example.com"),
                ("mobile", "8888888888"),
                ("password", "pw"),
            ],
        )
        .await;
    assert!(resp.text().await.unwrap().contains("<strong>5</strong>"));

    let calls = app.api.calls_to(&Method::POST, "/register/seller");
    let body = calls[0].body.clone().unwrap();
    assert_eq!(body["mobile"], "8888888888");
    assert!(body.get("mobileNo").is_none());
}

#[tokio::test]
async fn test_failed_registration_redirects_with_message() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::POST,
        "/register/customer",
        StatusCode::BAD_REQUEST,
        json!({"message": "Mobile number already registered"}),
    );

    let resp = app
        .post_form(
            "/register/customer",
            None,
            &[
                ("first_name", "A"),
                ("last_name", "B"),
                ("email", "a@b.c"),
                ("mobile", "1"),
                ("password", "p"),
            ],
        )
        .await;
    assert_eq!(
        location(&resp),
        "/register/customer?error=Mobile%20number%20already%20registered"
    );
}

// ============================================================================
// Customer pages
// ============================================================================

#[tokio::test]
async fn test_profile_shows_masked_card_and_addresses() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::GET,
        "/customer/current",
        StatusCode::OK,
        json!({
            "customerId": 1,
            "firstName": "Asha",
            "lastName": "Rao",
            "mobileNo": "9999999999",
            "emailId": "asha@example.com",
            "createdOn": "2025-03-07T10:15:00",
            "creditCard": {"cardNumber": "4111111111111234", "cardValidity": "09/27"},
            "address": {"home": {"buildingName": "A1", "streetNo": "5", "locality": "Gachibowli",
                                 "city": "Hyderabad", "state": "Telangana", "pincode": "500032"}}
        }),
    );

    let resp = app.get("/customer/profile", Some(CUSTOMER_COOKIE)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Asha Rao"));
    assert!(body.contains("**** **** **** 1234"));
    assert!(!body.contains("4111111111111234"));
    assert!(body.contains("07 Mar 2025"));
    assert!(body.contains("Hyderabad - 500032, Telangana"));

    let calls = app.api.calls_to(&Method::GET, "/customer/current");
    assert_eq!(calls[0].token.as_deref(), Some("customer-token"));
}

#[tokio::test]
async fn test_orders_list_links_each_order() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::GET,
        "/customer/orders",
        StatusCode::OK,
        json!([
            {"orderId": 3, "date": "2025-01-02", "orderStatus": "DELIVERED", "total": 30},
            {"orderId": 4, "orderStatus": "PENDING", "total": 12.5}
        ]),
    );

    let resp = app.get("/orders", Some(CUSTOMER_COOKIE)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("/orders/3"));
    assert!(body.contains("/orders/4"));
    assert!(body.contains("delivered"));
    assert!(body.contains("₹12.50"));

    let calls = app.api.calls_to(&Method::GET, "/customer/orders");
    assert_eq!(calls[0].token.as_deref(), Some("customer-token"));
}

#[tokio::test]
async fn test_order_detail_without_card_shows_na() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::GET,
        "/orders/3",
        StatusCode::OK,
        json!({
            "orderId": 3,
            "total": 30,
            "ordercartItems": [
                {"cartProduct": {"productName": "Pen", "price": 10}, "cartItemQuantity": 3}
            ]
        }),
    );

    let body = app
        .get("/orders/3", Some(CUSTOMER_COOKIE))
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Pen"));
    assert!(body.contains("N/A"));
}

#[tokio::test]
async fn test_failed_page_keeps_logged_in_nav() {
    let app = TestApp::spawn().await;
    app.api.stub(
        Method::GET,
        "/orders/3",
        StatusCode::NOT_FOUND,
        json!({"message": "Order not found"}),
    );

    let resp = app.get("/orders/3", Some(CUSTOMER_COOKIE)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Order not found"));
    assert!(body.contains("action=\"/logout\""));
    assert!(!body.contains("Customer Login"));
}

#[tokio::test]
async fn test_unknown_page_keeps_logged_in_nav() {
    let app = TestApp::spawn().await;

    let resp = app.get("/nowhere", Some(CUSTOMER_COOKIE)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.text().await.unwrap().contains("action=\"/logout\""));
}
