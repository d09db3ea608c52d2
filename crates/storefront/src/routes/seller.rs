//! Seller route handlers.
//!
//! Dashboard and product management. All require a seller session.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use hstore_core::{Price, ProductCategory, ProductId, ProductStatus};

use super::products::ProductView;
use super::{MessageQuery, NavView, redirect_with_error, redirect_with_success};
use crate::api::{Product, ProductInput};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireSeller;
use crate::models::SessionToken;
use crate::state::AppState;

// =============================================================================
// Product Form
// =============================================================================

/// Product create/edit form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    pub manufacturer: String,
    pub price: String,
    pub quantity: String,
    pub category: ProductCategory,
    pub status: ProductStatus,
}

/// A product form that can't be sent to the API.
#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("Price must be a non-negative number, got \"{0}\"")]
    InvalidPrice(String),

    #[error("Quantity must be a non-negative whole number, got \"{0}\"")]
    InvalidQuantity(String),
}

impl ProductForm {
    /// Validate the form into an API body. `id` is set for updates.
    fn into_input(self, id: Option<ProductId>) -> std::result::Result<ProductInput, ProductFormError> {
        let price = Decimal::from_str(self.price.trim())
            .ok()
            .filter(|p| !p.is_sign_negative())
            .ok_or_else(|| ProductFormError::InvalidPrice(self.price.clone()))?;
        let quantity = self
            .quantity
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|q| *q >= 0)
            .ok_or_else(|| ProductFormError::InvalidQuantity(self.quantity.clone()))?;

        Ok(ProductInput {
            product_id: id,
            product_name: self.product_name.trim().to_string(),
            description: self.description,
            manufacturer: self.manufacturer.trim().to_string(),
            price: Price::new(price),
            quantity,
            category: self.category,
            status: self.status,
        })
    }
}

/// Product form display data, blank or filled from an existing product.
#[derive(Clone)]
pub struct ProductFormView {
    pub action: String,
    pub submit_label: &'static str,
    pub product_name: String,
    pub description: String,
    pub manufacturer: String,
    pub price: String,
    pub quantity: String,
    pub category: &'static str,
    pub status: &'static str,
    pub categories: [ProductCategory; 5],
    pub statuses: [ProductStatus; 2],
}

impl ProductFormView {
    fn blank(action: &str, submit_label: &'static str) -> Self {
        Self {
            action: action.to_string(),
            submit_label,
            product_name: String::new(),
            description: String::new(),
            manufacturer: String::new(),
            price: String::new(),
            quantity: String::new(),
            category: ProductCategory::default().as_str(),
            status: ProductStatus::default().as_str(),
            categories: ProductCategory::ALL,
            statuses: ProductStatus::ALL,
        }
    }

    fn for_product(product: &Product) -> Self {
        Self {
            product_name: product.product_name.clone(),
            description: product.description.clone().unwrap_or_default(),
            manufacturer: product.manufacturer.clone().unwrap_or_default(),
            price: product.price.plain(),
            quantity: product.quantity.map(|q| q.to_string()).unwrap_or_default(),
            category: product.category.unwrap_or_default().as_str(),
            status: product.status.unwrap_or_default().as_str(),
            ..Self::blank(
                &format!("/seller/products/{}", product.product_id),
                "Save Changes",
            )
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Seller dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "seller/dashboard.html")]
pub struct DashboardTemplate {
    pub nav: NavView,
    pub seller_name: String,
    pub form: ProductFormView,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Seller product list template.
#[derive(Template, WebTemplate)]
#[template(path = "seller/products.html")]
pub struct SellerProductsTemplate {
    pub nav: NavView,
    pub products: Vec<ProductView>,
}

/// New/edit product page template.
#[derive(Template, WebTemplate)]
#[template(path = "seller/product_form.html")]
pub struct ProductFormTemplate {
    pub nav: NavView,
    pub title: String,
    pub form: ProductFormView,
    /// Set when editing an existing product.
    pub delete_action: Option<String>,
    pub error: Option<String>,
}

/// Validate `form` and create the product.
async fn submit_new_product(
    state: &AppState,
    token: &SessionToken,
    form: ProductForm,
) -> std::result::Result<(), String> {
    let input = form.into_input(None).map_err(|e| e.to_string())?;
    state
        .api()
        .create_product(token, &input)
        .await
        .map_err(|e| e.to_string())?;
    info!(name = %input.product_name, "Product created");
    Ok(())
}

// =============================================================================
// Dashboard
// =============================================================================

/// Display the seller dashboard.
#[instrument(skip(state, guard, query))]
pub async fn dashboard(
    State(state): State<AppState>,
    guard: RequireSeller,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let seller = state.api().current_seller(&guard.session.token).await?;

    Ok(DashboardTemplate {
        nav: NavView::for_session(&guard.session),
        seller_name: format!("{} {}", seller.first_name, seller.last_name),
        form: ProductFormView::blank("/seller/dashboard", "Add Product"),
        error: query.error,
        success: query.success,
    })
}

/// Handle the dashboard's add-product form.
#[instrument(skip(state, guard, form))]
pub async fn dashboard_create(
    State(state): State<AppState>,
    guard: RequireSeller,
    Form(form): Form<ProductForm>,
) -> Redirect {
    match submit_new_product(&state, &guard.session.token, form).await {
        Ok(()) => redirect_with_success("/seller/dashboard", "Product added successfully!"),
        Err(message) => {
            warn!(error = %message, "Failed to add product");
            redirect_with_error("/seller/dashboard", &message)
        }
    }
}

// =============================================================================
// Products
// =============================================================================

/// List the seller's own products.
#[instrument(skip(state, guard))]
pub async fn products(
    State(state): State<AppState>,
    guard: RequireSeller,
) -> Result<impl IntoResponse> {
    let seller = state.api().current_seller(&guard.session.token).await?;
    let products = state.api().seller_products(seller.seller_id).await?;

    Ok(SellerProductsTemplate {
        nav: NavView::for_session(&guard.session),
        products: products.iter().map(ProductView::from).collect(),
    })
}

/// Display the new product form.
pub async fn new_product(guard: RequireSeller, Query(query): Query<MessageQuery>) -> impl IntoResponse {
    ProductFormTemplate {
        nav: NavView::for_session(&guard.session),
        title: "Add New Product".to_string(),
        form: ProductFormView::blank("/seller/products/new", "Add Product"),
        delete_action: None,
        error: query.error,
    }
}

/// Handle the new product form.
#[instrument(skip(state, guard, form))]
pub async fn create_product(
    State(state): State<AppState>,
    guard: RequireSeller,
    Form(form): Form<ProductForm>,
) -> Redirect {
    match submit_new_product(&state, &guard.session.token, form).await {
        Ok(()) => Redirect::to("/seller/products"),
        Err(message) => {
            warn!(error = %message, "Failed to add product");
            redirect_with_error("/seller/products/new", &message)
        }
    }
}

/// Display the edit form for one product.
#[instrument(skip(state, guard, query))]
pub async fn edit_product(
    State(state): State<AppState>,
    guard: RequireSeller,
    Path(id): Path<ProductId>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let product = state
        .api()
        .get_product(id, Some(&guard.session.token))
        .await?;

    Ok(ProductFormTemplate {
        nav: NavView::for_session(&guard.session),
        title: format!("Edit {}", product.product_name),
        form: ProductFormView::for_product(&product),
        delete_action: Some(format!("/seller/products/{id}/delete")),
        error: query.error,
    })
}

/// Handle the edit form.
#[instrument(skip(state, guard, form))]
pub async fn update_product(
    State(state): State<AppState>,
    guard: RequireSeller,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Response {
    let back = format!("/seller/products/{id}");

    let input = match form.into_input(Some(id)) {
        Ok(input) => input,
        Err(e) => return redirect_with_error(&back, &e).into_response(),
    };

    match state
        .api()
        .update_product(&guard.session.token, &input)
        .await
    {
        Ok(()) => {
            info!("Product updated");
            Redirect::to("/seller/products").into_response()
        }
        Err(e) => {
            warn!(error = %e, "Failed to update product");
            redirect_with_error(&back, &e).into_response()
        }
    }
}

/// Delete a product.
#[instrument(skip(state, guard))]
pub async fn delete_product(
    State(state): State<AppState>,
    guard: RequireSeller,
    Path(id): Path<ProductId>,
) -> Redirect {
    match state.api().delete_product(&guard.session.token, id).await {
        Ok(()) => {
            info!("Product deleted");
            Redirect::to("/seller/products")
        }
        Err(e) => {
            warn!(error = %e, "Failed to delete product");
            redirect_with_error(&format!("/seller/products/{id}"), &e)
        }
    }
}
