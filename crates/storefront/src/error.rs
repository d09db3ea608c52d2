//! Unified error handling with Sentry integration.
//!
//! Handlers that load a page return `Result<T, AppError>`. An error renders
//! the error page; upstream failures are captured to Sentry first. Form
//! actions don't use this: they redirect back with `?error=` instead.
//!
//! `AppError` can't see the request, so the page it renders has an anonymous
//! nav bar. It also attaches an [`ErrorPage`] to the response, which
//! [`crate::middleware::error_page_middleware`] re-renders with the
//! visitor's session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ApiError;
use crate::filters;
use crate::routes::NavView;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A backend API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether this error points at a fault outside the visitor's control.
    fn is_upstream_fault(&self) -> bool {
        match self {
            Self::Api(ApiError::Status { status, .. }) => status.is_server_error(),
            Self::Api(ApiError::Network { .. } | ApiError::UnexpectedResponse { .. }) => true,
            Self::Api(ApiError::NotInCatalog(_)) | Self::NotFound(_) => false,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Api(ApiError::Status { status, .. }) if status.is_client_error() => *status,
            Self::Api(ApiError::NotInCatalog(_)) => StatusCode::BAD_REQUEST,
            Self::Api(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Error page template.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub nav: NavView,
    pub status: u16,
    pub message: String,
}

/// The content of an error page, carried in response extensions so it can
/// be re-rendered once the session is known.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
}

impl ErrorPage {
    /// Render the page with the given navigation.
    #[must_use]
    pub fn render(self, nav: NavView) -> Response {
        let status = self.status;
        let mut response = (
            status,
            ErrorTemplate {
                nav,
                status: status.as_u16(),
                message: self.message.clone(),
            },
        )
            .into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_upstream_fault() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        ErrorPage {
            status: self.status(),
            message: self.to_string(),
        }
        .render(NavView::default())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("/nowhere".to_string());
        assert_eq!(err.to_string(), "Not found: /nowhere");

        let err = AppError::from(ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid token".to_string(),
        });
        assert_eq!(err.to_string(), "Invalid token");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Api(ApiError::Status {
                status: StatusCode::NOT_FOUND,
                message: "Order not found".to_string(),
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Api(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Error 500".to_string(),
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Api(ApiError::UnexpectedResponse {
                status: StatusCode::OK,
                message: None,
            })),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_error_response_carries_page() {
        let response = AppError::NotFound("/gone".to_string()).into_response();
        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(page.status, StatusCode::NOT_FOUND);
        assert_eq!(page.message, "Not found: /gone");
    }
}
