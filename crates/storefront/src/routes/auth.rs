//! Authentication route handlers.
//!
//! Login and registration exist per role (`/login/customer`,
//! `/login/seller`, ...). A successful login writes the session cookies and
//! sends the visitor to the role's home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use hstore_core::Role;

use super::{MessageQuery, NavView, redirect_with_error};
use crate::api::{RegisteredAccount, Registration};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{CookieSession, OptionalSession, SessionStore};
use crate::models::{SessionToken, session_ttl};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub mobile: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
}

impl RegisterForm {
    fn as_registration(&self) -> Registration<'_> {
        Registration {
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            mobile: &self.mobile,
            password: &self.password,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: NavView,
    pub role: Role,
    pub error: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub nav: NavView,
    pub role: Role,
    pub error: Option<String>,
}

/// Registration success page template.
///
/// Refreshes to the login page after two seconds.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register_success.html")]
pub struct RegisterSuccessTemplate {
    pub nav: NavView,
    pub role: Role,
    pub account_id: Option<String>,
}

/// Parse the `{role}` path segment.
fn parse_role(raw: &str) -> Result<Role> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("No such account type: {raw}")))
}

/// The ID a registration created, for the role that registered.
fn registered_id(role: Role, account: &RegisteredAccount) -> Option<String> {
    match role {
        Role::Customer => account.customer_id.map(|id| id.to_string()),
        Role::Seller => account.seller_id.map(|id| id.to_string()),
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    Path(role): Path<String>,
    OptionalSession(session): OptionalSession,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    Ok(LoginTemplate {
        nav: NavView::from_session(session.as_ref()),
        role: parse_role(&role)?,
        error: query.error,
    })
}

/// Handle login form submission.
///
/// On success the session lives until the backend's `sessionEndTime`, or
/// for the default TTL when the response has none.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    Path(role): Path<String>,
    mut session: CookieSession,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let role = parse_role(&role)?;

    match state.api().login(role, &form.mobile, &form.password).await {
        Ok(login) => {
            let ttl = session_ttl(login.session_end_time.as_deref(), Utc::now());
            session.create_session(&SessionToken::new(login.token), role, ttl);
            info!(%role, ttl_secs = ttl.as_secs(), "Logged in");

            Ok((session, Redirect::to(role.home_path())).into_response())
        }
        Err(e) => {
            warn!(%role, error = %e, "Login failed");
            Ok(redirect_with_error(&role.login_path(), &e).into_response())
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    Path(role): Path<String>,
    OptionalSession(session): OptionalSession,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    Ok(RegisterTemplate {
        nav: NavView::from_session(session.as_ref()),
        role: parse_role(&role)?,
        error: query.error,
    })
}

/// Handle registration form submission.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    Path(role): Path<String>,
    OptionalSession(session): OptionalSession,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let role = parse_role(&role)?;

    match state.api().register(role, form.as_registration()).await {
        Ok(account) => {
            info!(%role, "Registered new account");
            Ok(RegisterSuccessTemplate {
                nav: NavView::from_session(session.as_ref()),
                role,
                account_id: registered_id(role, &account),
            }
            .into_response())
        }
        Err(e) => {
            warn!(%role, error = %e, "Registration failed");
            Ok(redirect_with_error(&role.register_path(), &e).into_response())
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// Both backend logout endpoints are called concurrently, since the role
/// tag isn't trusted to pick one. Their failures are logged and otherwise
/// ignored: the session is cleared whatever happens.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, mut session: CookieSession) -> Response {
    if let Some(token) = session.read_token() {
        let api = state.api();
        let (customer, seller) = tokio::join!(
            api.logout(Role::Customer, &token),
            api.logout(Role::Seller, &token),
        );

        for (role, result) in [(Role::Customer, customer), (Role::Seller, seller)] {
            if let Err(e) = result {
                warn!(%role, error = %e, "Backend logout failed");
            }
        }
    }

    session.clear_session();
    (session, Redirect::to("/")).into_response()
}
