//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use tracing::{instrument, warn};

use hstore_core::ProductId;

use super::{MessageQuery, NavView};
use crate::api::Product;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalSession;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub description: Option<String>,
    pub manufacturer: Option<String>,
    pub quantity: Option<i64>,
    pub category: Option<&'static str>,
    /// Lower-cased status code, e.g. `available`.
    pub status: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.product_id,
            name: product.product_name.clone(),
            price: product.price.to_string(),
            description: product.description.clone().filter(|d| !d.is_empty()),
            manufacturer: product.manufacturer.clone(),
            quantity: product.quantity,
            category: product.category.map(|c| c.label()),
            status: product.status.map(|s| s.as_str().to_lowercase()),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub nav: NavView,
    pub products: Vec<ProductView>,
}

/// Product detail page template.
///
/// `product` is `None` when the API didn't return a product; `error` then
/// says why.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub nav: NavView,
    pub product_id: ProductId,
    pub product: Option<ProductView>,
    pub error: Option<String>,
}

/// Display product listing page.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    OptionalSession(session): OptionalSession,
) -> Result<impl IntoResponse> {
    let products = state.api().list_products().await?;

    Ok(ProductsIndexTemplate {
        nav: NavView::from_session(session.as_ref()),
        products: products.iter().map(ProductView::from).collect(),
    })
}

/// Display product detail page.
///
/// The session token is sent when there is one. A response that isn't a
/// product renders inline with a link back to the listing.
#[instrument(skip(state, session, query))]
pub async fn show(
    State(state): State<AppState>,
    OptionalSession(session): OptionalSession,
    Path(id): Path<ProductId>,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let token = session.as_ref().map(|s| &s.token);

    let (product, error) = match state.api().get_product(id, token).await {
        Ok(product) => (Some(ProductView::from(&product)), query.error),
        Err(e) => {
            warn!(error = %e, "Failed to load product");
            (None, Some(e.to_string()))
        }
    };

    ProductShowTemplate {
        nav: NavView::from_session(session.as_ref()),
        product_id: id,
        product,
        error,
    }
}
