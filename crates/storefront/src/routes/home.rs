//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::NavView;
use super::products::ProductView;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalSession;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: NavView,
    pub products: Vec<ProductView>,
}

/// Display the home page with the catalog as featured products.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    OptionalSession(session): OptionalSession,
) -> Result<impl IntoResponse> {
    let products = state.api().list_products().await?;

    Ok(HomeTemplate {
        nav: NavView::from_session(session.as_ref()),
        products: products.iter().map(ProductView::from).collect(),
    })
}
