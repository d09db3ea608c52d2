//! Customer account route handlers.
//!
//! Profile and order pages. All require a customer session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use tracing::instrument;

use hstore_core::OrderId;

use super::NavView;
use crate::api::{Address, CartItem, Customer, Order};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireCustomer;
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Address display data for templates.
#[derive(Clone)]
pub struct AddressView {
    /// Address kind (`home`, `work`, ...), empty for an order's address.
    pub kind: String,
    pub street: String,
    pub city: String,
}

impl AddressView {
    fn new(kind: &str, address: &Address) -> Self {
        Self {
            kind: kind.to_string(),
            street: format!(
                "{}, {}, {}",
                address.building_name, address.street_no, address.locality
            ),
            city: format!(
                "{} - {}, {}",
                address.city, address.pincode, address.state
            ),
        }
    }
}

/// Profile page data.
#[derive(Clone)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub joined: String,
    pub card: Option<String>,
    pub card_validity: Option<String>,
    pub addresses: Vec<AddressView>,
}

impl From<&Customer> for ProfileView {
    fn from(customer: &Customer) -> Self {
        Self {
            name: format!("{} {}", customer.first_name, customer.last_name),
            email: customer.email_id.clone().unwrap_or_default(),
            mobile: customer.mobile_no.clone().unwrap_or_default(),
            joined: customer
                .created_on
                .as_deref()
                .map(display_date)
                .unwrap_or_default(),
            card: customer
                .credit_card
                .as_ref()
                .map(|c| mask_card(Some(&c.card_number))),
            card_validity: customer
                .credit_card
                .as_ref()
                .and_then(|c| c.card_validity.clone()),
            addresses: customer
                .address
                .iter()
                .map(|(kind, address)| AddressView::new(kind, address))
                .collect(),
        }
    }
}

/// Order line display data.
#[derive(Clone)]
pub struct OrderLineView {
    pub name: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartItem> for OrderLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            name: item.cart_product.product_name.clone(),
            quantity: item.cart_item_quantity,
            line_total: item.line_total().to_string(),
        }
    }
}

/// Order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub id: OrderId,
    pub date: String,
    /// Lower-cased order status.
    pub status: String,
    pub total: String,
    pub card: String,
    pub lines: Vec<OrderLineView>,
    pub address: Option<AddressView>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.order_id,
            date: order.date.as_deref().map(display_date).unwrap_or_default(),
            status: order
                .order_status
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_default(),
            total: order.total.to_string(),
            card: mask_card(order.card_number.as_deref()),
            lines: order.order_cart_items.iter().map(OrderLineView::from).collect(),
            address: order.address.as_ref().map(|a| AddressView::new("", a)),
        }
    }
}

/// Show only the last four digits of a card number, or `N/A` without one.
fn mask_card(card: Option<&str>) -> String {
    match card.filter(|c| !c.is_empty()) {
        Some(card) => {
            let mut last4: Vec<char> = card.chars().rev().take(4).collect();
            last4.reverse();
            format!("**** **** **** {}", last4.into_iter().collect::<String>())
        }
        None => "N/A".to_string(),
    }
}

/// Render an API date or timestamp as a calendar date.
///
/// Anything that doesn't start with `YYYY-MM-DD` is shown as-is.
fn display_date(raw: &str) -> String {
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map_or_else(|| raw.to_string(), |d| d.format("%d %b %Y").to_string())
}

// =============================================================================
// Templates
// =============================================================================

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "customer/profile.html")]
pub struct ProfileTemplate {
    pub nav: NavView,
    pub profile: ProfileView,
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub nav: NavView,
    pub orders: Vec<OrderView>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub nav: NavView,
    pub order: OrderView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the customer's profile.
#[instrument(skip(state, guard))]
pub async fn profile(
    State(state): State<AppState>,
    guard: RequireCustomer,
) -> Result<impl IntoResponse> {
    let customer = state.api().current_customer(&guard.session.token).await?;

    Ok(ProfileTemplate {
        nav: NavView::for_session(&guard.session),
        profile: ProfileView::from(&customer),
    })
}

/// Display the customer's orders.
#[instrument(skip(state, guard))]
pub async fn orders(
    State(state): State<AppState>,
    guard: RequireCustomer,
) -> Result<impl IntoResponse> {
    let orders = state.api().customer_orders(&guard.session.token).await?;

    Ok(OrdersTemplate {
        nav: NavView::for_session(&guard.session),
        orders: orders.iter().map(OrderView::from).collect(),
    })
}

/// Display one order.
#[instrument(skip(state, guard))]
pub async fn order(
    State(state): State<AppState>,
    guard: RequireCustomer,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse> {
    let order = state.api().order(&guard.session.token, id).await?;

    Ok(OrderShowTemplate {
        nav: NavView::for_session(&guard.session),
        order: OrderView::from(&order),
    })
}
