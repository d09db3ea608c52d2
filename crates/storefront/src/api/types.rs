//! Wire types for the backend REST API.
//!
//! Field names follow the backend's camelCase JSON. Responses are decoded
//! as-is and handed to the views; nothing here normalizes or validates what
//! the API sends beyond what decoding requires.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hstore_core::{
    CartItemId, CustomerId, OrderId, Price, ProductCategory, ProductId, ProductStatus, SellerId,
};

// =============================================================================
// Auth Types
// =============================================================================

/// Login request body.
///
/// The two account kinds name the phone field differently.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LoginRequest<'a> {
    Customer {
        #[serde(rename = "mobileId")]
        mobile_id: &'a str,
        password: &'a str,
    },
    Seller {
        mobile: &'a str,
        password: &'a str,
    },
}

/// Successful login response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Opaque session token.
    pub token: String,
    /// When the backend will expire the session, if it says.
    #[serde(default)]
    pub session_end_time: Option<String>,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RegisterRequest<'a> {
    #[serde(rename_all = "camelCase")]
    Customer {
        first_name: &'a str,
        last_name: &'a str,
        password: &'a str,
        mobile_no: &'a str,
        email_id: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    Seller {
        first_name: &'a str,
        last_name: &'a str,
        password: &'a str,
        mobile: &'a str,
        email_id: &'a str,
    },
}

/// The entity a registration creates. Only its ID is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredAccount {
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub seller_id: Option<SellerId>,
}

/// Logout request body.
#[derive(Debug, Clone, Serialize)]
pub struct LogoutRequest<'a> {
    pub token: &'a str,
    pub message: &'a str,
}

// =============================================================================
// Product Types
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Price,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub category: Option<ProductCategory>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
}

/// Product create/update body.
///
/// `product_id` is set for updates (`PUT /products`) and omitted for creates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub description: String,
    pub manufacturer: String,
    pub price: Price,
    pub quantity: i64,
    pub category: ProductCategory,
    pub status: ProductStatus,
}

// =============================================================================
// Cart Types
// =============================================================================

/// Body for adding a product to, or removing it from, the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRequest {
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Price,
    pub quantity: u32,
}

/// Product snapshot embedded in a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub price: Price,
}

/// One line of a cart or order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(default)]
    pub cart_item_id: Option<CartItemId>,
    pub cart_product: CartProduct,
    pub cart_item_quantity: u32,
}

impl CartItem {
    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.cart_product.price.times(self.cart_item_quantity)
    }
}

/// A customer's cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub cart_id: Option<i32>,
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
    #[serde(default)]
    pub cart_total: Price,
}

// =============================================================================
// Account Types
// =============================================================================

/// A postal address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub building_name: String,
    pub street_no: String,
    pub locality: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// A stored payment card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub card_number: String,
    #[serde(default)]
    pub card_validity: Option<String>,
}

/// The logged-in customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub credit_card: Option<CreditCard>,
    /// Addresses keyed by kind (`home`, `work`, ...).
    #[serde(default)]
    pub address: BTreeMap<String, Address>,
}

/// The logged-in seller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub seller_id: SellerId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub order_status: Option<String>,
    pub total: Price,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(rename = "ordercartItems", default)]
    pub order_cart_items: Vec<CartItem>,
}
