//! Cart route handlers.
//!
//! Every cart page and action is customer-only. Mutations go straight to
//! the API and redirect back to `/cart`, which re-renders from a fresh
//! `GET /cart`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{instrument, warn};

use hstore_core::{CartItemId, Price, ProductId};

use super::{MessageQuery, NavView, redirect_with_error};
use crate::api::{Cart, CartItem, CartProduct};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireCustomer;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub cart_item_id: Option<CartItemId>,
    pub name: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .cart_items
                .iter()
                .map(|item| CartLineView {
                    cart_item_id: item.cart_item_id,
                    name: item.cart_product.product_name.clone(),
                    quantity: item.cart_item_quantity,
                    line_total: item.line_total().to_string(),
                })
                .collect(),
            total: cart.cart_total.to_string(),
        }
    }
}

/// Remove-line form data.
///
/// Carries what the cart page shows for the line; the product itself is
/// looked up in the catalog by name.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub cart_item_id: Option<CartItemId>,
    pub product_name: String,
    pub quantity: u32,
}

impl From<RemoveFromCartForm> for CartItem {
    fn from(form: RemoveFromCartForm) -> Self {
        Self {
            cart_item_id: form.cart_item_id,
            cart_product: CartProduct {
                product_id: None,
                product_name: form.product_name,
                price: Price::ZERO,
            },
            cart_item_quantity: form.quantity,
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: NavView,
    pub cart: CartView,
    pub error: Option<String>,
}

/// Display cart page.
#[instrument(skip(state, guard, query))]
pub async fn show(
    State(state): State<AppState>,
    guard: RequireCustomer,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let cart = state.api().get_cart(&guard.session.token).await?;

    Ok(CartShowTemplate {
        nav: NavView::for_session(&guard.session),
        cart: CartView::from(&cart),
        error: query.error,
    })
}

/// Add one unit of a product to the cart.
///
/// The product is re-fetched so the cart line carries its current name and
/// price.
#[instrument(skip(state, guard))]
pub async fn add(
    State(state): State<AppState>,
    guard: RequireCustomer,
    Path(id): Path<ProductId>,
) -> Response {
    let token = &guard.session.token;

    let result = match state.api().get_product(id, Some(token)).await {
        Ok(product) => state.api().add_to_cart(token, &product).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Redirect::to("/cart").into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to add to cart");
            redirect_with_error(&format!("/products/{id}"), &e).into_response()
        }
    }
}

/// Remove a line from the cart.
#[instrument(skip(state, guard, form), fields(name = %form.product_name))]
pub async fn remove(
    State(state): State<AppState>,
    guard: RequireCustomer,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let item = CartItem::from(form);

    match state
        .api()
        .remove_from_cart(&guard.session.token, &item)
        .await
    {
        Ok(_) => Redirect::to("/cart").into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to remove from cart");
            redirect_with_error("/cart", &e).into_response()
        }
    }
}

/// Empty the cart.
#[instrument(skip(state, guard))]
pub async fn clear(State(state): State<AppState>, guard: RequireCustomer) -> Response {
    match state.api().clear_cart(&guard.session.token).await {
        Ok(_) => Redirect::to("/cart").into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to clear cart");
            redirect_with_error("/cart", &e).into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_cart_view_line_totals() {
        let cart: Cart = serde_json::from_value(json!({
            "cartItems": [
                {"cartItemId": 1, "cartProduct": {"productName": "Pen", "price": 12.5}, "cartItemQuantity": 4}
            ],
            "cartTotal": 50
        }))
        .unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].line_total, "₹50.00");
        assert_eq!(view.total, "₹50.00");
    }

    #[test]
    fn test_remove_form_becomes_cart_item() {
        let item = CartItem::from(RemoveFromCartForm {
            cart_item_id: None,
            product_name: "Pen".to_string(),
            quantity: 3,
        });
        assert_eq!(item.cart_product.product_name, "Pen");
        assert_eq!(item.cart_item_quantity, 3);
        assert!(item.cart_product.product_id.is_none());
    }
}
