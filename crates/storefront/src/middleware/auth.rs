//! Route guard extractors.
//!
//! A protected handler takes [`RequireCustomer`] or [`RequireSeller`]. When
//! the session has no token the extractor rejects with a redirect to that
//! role's login page, so the handler body never runs and no API call is made.
//!
//! Only token presence is checked. The stored role tag is not compared to the
//! required role, and token validity is left to the API.

use std::marker::PhantomData;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use hstore_core::Role;

use super::session::{CookieSession, SessionStore};
use crate::models::Session;

/// A role a route can be guarded for.
pub trait GuardedRole: Send + Sync + 'static {
    /// The role whose login page a rejected request is sent to.
    const ROLE: Role;
}

/// Marker for customer-only routes.
#[derive(Debug, Clone, Copy)]
pub struct CustomerRole;

impl GuardedRole for CustomerRole {
    const ROLE: Role = Role::Customer;
}

/// Marker for seller-only routes.
#[derive(Debug, Clone, Copy)]
pub struct SellerRole;

impl GuardedRole for SellerRole {
    const ROLE: Role = Role::Seller;
}

/// Extractor that requires a session.
///
/// # Example
///
/// ```rust,ignore
/// async fn cart(
///     State(state): State<AppState>,
///     RequireCustomer { session, .. }: RequireCustomer,
/// ) -> Result<CartTemplate, AppError> {
///     let cart = state.api().get_cart(&session.token).await?;
///     // ...
/// }
/// ```
#[derive(Debug)]
pub struct RequireSession<R: GuardedRole> {
    /// The session that let the request through.
    pub session: Session,
    _role: PhantomData<R>,
}

/// Guard for customer pages.
pub type RequireCustomer = RequireSession<CustomerRole>;

/// Guard for seller pages.
pub type RequireSeller = RequireSession<SellerRole>;

/// Rejection sending the visitor to a login page.
#[derive(Debug)]
pub struct LoginRedirect(pub Role);

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to(&self.0.login_path()).into_response()
    }
}

impl<S, R> FromRequestParts<S> for RequireSession<R>
where
    S: Send + Sync,
    R: GuardedRole,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(cookies) = CookieSession::from_request_parts(parts, state).await;

        let Some(session) = cookies.current() else {
            debug!(path = %parts.uri.path(), role = %R::ROLE, "No session, redirecting to login");
            return Err(LoginRedirect(R::ROLE));
        };

        Ok(Self {
            session,
            _role: PhantomData,
        })
    }
}

/// Extractor for pages that render differently with a session but don't
/// require one.
#[derive(Debug)]
pub struct OptionalSession(pub Option<Session>);

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(cookies) = CookieSession::from_request_parts(parts, state).await;
        Ok(Self(cookies.current()))
    }
}
