//! Client for the H-Store backend REST API.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local sync, NO response cache
//! - Every call goes through one helper ([`ApiClient::request`]) that takes
//!   the method, path, optional JSON body and optional session token, and
//!   returns `Result<T, ApiError>`
//! - Authenticated calls carry the session token in a custom `token` header
//!   (not `Authorization: Bearer`)
//! - No retries, no backoff: a failed call surfaces its message once
//!
//! # Example
//!
//! ```rust,ignore
//! use hstore_storefront::api::ApiClient;
//!
//! let client = ApiClient::new(&config.api_base_url);
//!
//! let products = client.list_products().await?;
//! let cart = client.get_cart(&session.token).await?;
//! ```

mod auth;
mod cart;
mod catalog;
mod customer;
mod seller;
pub mod types;

pub use auth::Registration;
pub use catalog::EMPTY_CATALOG_MESSAGE;
pub use types::*;

use std::sync::Arc;

use reqwest::{Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::models::SessionToken;

/// Name of the request header carrying the session token.
pub const TOKEN_HEADER: &str = "token";

/// Errors that can occur when talking to the backend API.
///
/// `Display` is the message shown to the visitor.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    ///
    /// `message` is the server's own message when the body was JSON with a
    /// `message` field, otherwise `Error <status>`.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// The API answered, but not with the shape this call expects.
    #[error("{}", unexpected_message(.status, .message.as_deref()))]
    UnexpectedResponse {
        status: StatusCode,
        message: Option<String>,
    },

    /// A cart line names a product that is no longer in the catalog.
    #[error("Product \"{0}\" not found in catalog.")]
    NotInCatalog(String),
}

impl ApiError {
    /// HTTP status returned by the API, if it answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } | Self::UnexpectedResponse { status, .. } => {
                Some(*status)
            }
            Self::Network { .. } | Self::NotInCatalog(_) => None,
        }
    }
}

fn unexpected_message(status: &StatusCode, message: Option<&str>) -> String {
    message.map_or_else(
        || format!("Unexpected response (status {})", status.as_u16()),
        String::from,
    )
}

/// Result type alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// A response that has been fully read but not yet interpreted.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Turn a non-success response into an [`ApiError::Status`].
    fn into_checked(self) -> ApiResult<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                message: error_message(self.status, &self.body),
            })
        }
    }

    /// Decode the body as JSON.
    fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            tracing::error!(
                error = %e,
                status = %self.status,
                body = %self.body.chars().take(500).collect::<String>(),
                "Failed to decode API response"
            );
            ApiError::UnexpectedResponse {
                status: self.status,
                message: None,
            }
        })
    }
}

/// The part of an API error body the storefront cares about.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract a human-readable message from an error body.
///
/// Uses the JSON `message` field when present, else `Error <status>`.
#[must_use]
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Error {}", status.as_u16()))
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the backend REST API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the API at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Send a request and read the whole response, whatever its status.
    ///
    /// Only transport failures are errors here.
    pub(crate) async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&SessionToken>,
    ) -> ApiResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.inner.base_url);
        debug!(%method, %url, authenticated = token.is_some(), "API request");

        let mut request = self
            .inner
            .client
            .request(method, &url)
            .header(header::CACHE_CONTROL, "no-cache");
        if let Some(token) = token {
            request = request.header(TOKEN_HEADER, token.expose());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ApiError::Network {
            url: url.clone(),
            source,
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Network { url, source })?;

        Ok(RawResponse { status, body })
    }

    /// Issue a request and decode a successful JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the request fails in transit,
    /// [`ApiError::Status`] for non-success responses, and
    /// [`ApiError::UnexpectedResponse`] if the body doesn't decode as `T`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&SessionToken>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(method, path, body, token)
            .await?
            .into_checked()?
            .json()
    }

    /// Issue a request whose success body is irrelevant.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::request`], minus decoding.
    pub async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&SessionToken>,
    ) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, body, token).await?.into_checked()?;
        Ok(())
    }
}

/// Placeholder body type for requests without a body.
pub(crate) const NO_BODY: Option<&()> = None;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_uses_server_message() {
        let msg = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"timestamp":"2025-01-01T00:00:00","message":"Invalid mobile number","details":"uri=/login"}"#,
        );
        assert_eq!(msg, "Invalid mobile number");
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "Error 500"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, "{}"), "Error 404");
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, r#"{"message":""}"#),
            "Error 401"
        );
    }

    #[test]
    fn test_unexpected_response_display() {
        let err = ApiError::UnexpectedResponse {
            status: StatusCode::OK,
            message: None,
        };
        assert_eq!(err.to_string(), "Unexpected response (status 200)");

        let err = ApiError::UnexpectedResponse {
            status: StatusCode::NOT_FOUND,
            message: Some("Product not found with id 9".to_string()),
        };
        assert_eq!(err.to_string(), "Product not found with id 9");
    }

    #[test]
    fn test_not_in_catalog_display() {
        let err = ApiError::NotInCatalog("Blue Mug".to_string());
        assert_eq!(err.to_string(), "Product \"Blue Mug\" not found in catalog.");
    }

    #[test]
    fn test_status_accessor() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: "nope".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(ApiError::NotInCatalog("x".into()).status(), None);
    }

    #[test]
    fn test_client_trims_base_url() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
