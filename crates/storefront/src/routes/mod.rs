//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Home page (featured products)
//! GET  /health                        - Health check
//!
//! # Products
//! GET  /products                      - Product listing
//! GET  /products/{id}                 - Product detail
//! POST /products/{id}/cart            - Add to cart (customer)
//!
//! # Cart (customer)
//! GET  /cart                          - Cart page
//! POST /cart/remove                   - Remove a line
//! POST /cart/clear                    - Empty the cart
//!
//! # Auth
//! GET  /login/{role}                  - Login page
//! POST /login/{role}                  - Login action
//! GET  /register/{role}               - Register page
//! POST /register/{role}               - Register action
//! POST /logout                        - Logout action
//!
//! # Customer account (customer)
//! GET  /customer/profile              - Profile
//! GET  /orders                        - Order history
//! GET  /orders/{id}                   - Order detail
//!
//! # Seller (seller)
//! GET  /seller/dashboard              - Welcome + add-product form
//! POST /seller/dashboard              - Add product
//! GET  /seller/products               - Seller's products
//! GET  /seller/products/new           - New product form
//! POST /seller/products/new           - Create product
//! GET  /seller/products/{id}          - Edit product form
//! POST /seller/products/{id}          - Update product
//! POST /seller/products/{id}/delete   - Delete product
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod home;
pub mod products;
pub mod seller;

use std::fmt::Display;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;

use hstore_core::Role;

use crate::models::Session;
use crate::state::AppState;

// =============================================================================
// Shared View Types
// =============================================================================

/// Navigation bar state, derived from the session on every page.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavView {
    pub logged_in: bool,
    pub is_customer: bool,
    pub is_seller: bool,
}

impl NavView {
    /// Build the navigation state for `session`.
    #[must_use]
    pub fn from_session(session: Option<&Session>) -> Self {
        let role = session.and_then(|s| s.role);
        Self {
            logged_in: session.is_some(),
            is_customer: role == Some(Role::Customer),
            is_seller: role == Some(Role::Seller),
        }
    }

    /// Navigation for a page behind a guard.
    #[must_use]
    pub fn for_session(session: &Session) -> Self {
        Self::from_session(Some(session))
    }
}

/// Query parameters for error/success display.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Redirect back to `path` with `err` shown as the page's error message.
pub(crate) fn redirect_with_error(path: &str, err: &impl Display) -> Redirect {
    Redirect::to(&format!(
        "{path}?error={}",
        urlencoding::encode(&err.to_string())
    ))
}

/// Redirect to `path` with a success message.
pub(crate) fn redirect_with_success(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{path}?success={}", urlencoding::encode(message)))
}

// =============================================================================
// Routers
// =============================================================================

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/cart", post(cart::add))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login/{role}", get(auth::login_page).post(auth::login))
        .route(
            "/register/{role}",
            get(auth::register_page).post(auth::register),
        )
        .route("/logout", post(auth::logout))
}

/// Create the customer account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/customer/profile", get(account::profile))
        .route("/orders", get(account::orders))
        .route("/orders/{id}", get(account::order))
}

/// Create the seller routes router.
pub fn seller_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/dashboard",
            get(seller::dashboard).post(seller::dashboard_create),
        )
        .route("/products", get(seller::products))
        .route(
            "/products/new",
            get(seller::new_product).post(seller::create_product),
        )
        .route(
            "/products/{id}",
            get(seller::edit_product).post(seller::update_product),
        )
        .route("/products/{id}/delete", post(seller::delete_product))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/seller", seller_routes())
        .merge(auth_routes())
        .merge(account_routes())
}

#[cfg(test)]
mod tests {
    use crate::models::SessionToken;

    use super::*;

    fn session(role: Option<Role>) -> Session {
        Session {
            token: SessionToken::new("t"),
            role,
        }
    }

    #[test]
    fn test_nav_without_session() {
        let nav = NavView::from_session(None);
        assert!(!nav.logged_in);
        assert!(!nav.is_customer);
        assert!(!nav.is_seller);
    }

    #[test]
    fn test_nav_follows_role_tag() {
        let nav = NavView::for_session(&session(Some(Role::Seller)));
        assert!(nav.logged_in);
        assert!(nav.is_seller);
        assert!(!nav.is_customer);

        let nav = NavView::for_session(&session(None));
        assert!(nav.logged_in);
        assert!(!nav.is_customer && !nav.is_seller);
    }
}
