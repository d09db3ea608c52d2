//! Session-aware error pages.
//!
//! Re-renders any [`ErrorPage`] a handler produced so its nav bar reflects
//! the visitor's session, like every other page.

use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;

use super::session::{CookieSession, SessionStore};
use crate::error::ErrorPage;
use crate::routes::NavView;

/// Render error pages with the request's session in the nav bar.
pub async fn error_page_middleware(request: Request, next: Next) -> Response {
    let session = CookieSession::new(CookieJar::from_headers(request.headers())).current();

    let mut response = next.run(request).await;

    if session.is_none() {
        return response;
    }
    let Some(page) = response.extensions_mut().remove::<ErrorPage>() else {
        return response;
    };

    page.render(NavView::from_session(session.as_ref()))
}
