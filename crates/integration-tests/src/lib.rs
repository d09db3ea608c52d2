//! Integration tests for the H-Store storefront.
//!
//! Each test starts two in-process servers on ephemeral ports:
//!
//! - a fake backend API ([`FakeApi`]) that answers with canned JSON and
//!   records every call it receives
//! - the real storefront router, configured to talk to the fake
//!
//! and drives the storefront over HTTP with `reqwest`, redirects disabled so
//! tests can assert on `Location` and `Set-Cookie` directly.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hstore-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use reqwest::{Client, header};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use hstore_storefront::{app, config::StorefrontConfig, state::AppState};

/// Session cookie header for a logged-in customer.
pub const CUSTOMER_COOKIE: &str = "token=customer-token; userType=customer";

/// Session cookie header for a logged-in seller.
pub const SELLER_COOKIE: &str = "token=seller-token; userType=seller";

// ============================================================================
// Fake backend
// ============================================================================

/// One request the fake backend received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    /// Value of the `token` header, if sent.
    pub token: Option<String>,
    /// Parsed JSON body, if any.
    pub body: Option<Value>,
}

#[derive(Default)]
struct FakeApiState {
    calls: Mutex<Vec<RecordedCall>>,
    replies: Mutex<HashMap<(Method, String), (StatusCode, Value)>>,
}

/// In-process stand-in for the backend REST API.
///
/// Unstubbed routes answer `404 {"message": "Not stubbed: ..."}`.
#[derive(Clone)]
pub struct FakeApi {
    addr: SocketAddr,
    state: Arc<FakeApiState>,
}

impl FakeApi {
    /// Start the fake on an ephemeral port.
    pub async fn start() -> Self {
        let state = Arc::new(FakeApiState::default());
        let router = Router::new()
            .fallback(handle_fake_request)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, state }
    }

    /// Base URL the storefront should be pointed at.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer `method path` with `status` and `body`.
    pub fn stub(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body));
    }

    /// Every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Calls received for `method path`.
    #[must_use]
    pub fn calls_to(&self, method: &Method, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| &c.method == method && c.path == path)
            .collect()
    }
}

async fn handle_fake_request(
    State(state): State<Arc<FakeApiState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();

    state.calls.lock().unwrap().push(RecordedCall {
        method: method.clone(),
        path: path.clone(),
        token: headers
            .get("token")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_slice(&body).ok(),
    });

    let reply = state
        .replies
        .lock()
        .unwrap()
        .get(&(method.clone(), path.clone()))
        .cloned();

    match reply {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("Not stubbed: {method} {path}")})),
        )
            .into_response(),
    }
}

// ============================================================================
// Storefront under test
// ============================================================================

/// A running storefront wired to a [`FakeApi`].
pub struct TestApp {
    pub api: FakeApi,
    pub url: String,
    pub client: Client,
}

impl TestApp {
    /// Start a fake API and a storefront pointed at it.
    pub async fn spawn() -> Self {
        let api = FakeApi::start().await;
        let config = StorefrontConfig::for_api(&api.url());
        let router = app(AppState::new(config));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            api,
            url: format!("http://{addr}"),
            client,
        }
    }

    /// `GET path`, with `cookie` as the `Cookie` header when given.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> reqwest::Response {
        let mut request = self.client.get(format!("{}{path}", self.url));
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        request.send().await.unwrap()
    }

    /// `POST path` with a URL-encoded form body.
    pub async fn post_form(
        &self,
        path: &str,
        cookie: Option<&str>,
        fields: &[(&str, &str)],
    ) -> reqwest::Response {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut request = self
            .client
            .post(format!("{}{path}", self.url))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        request.send().await.unwrap()
    }
}

// ============================================================================
// Response helpers
// ============================================================================

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &reqwest::Response) -> String {
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

/// Every `Set-Cookie` header on a response.
#[must_use]
pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// The `Set-Cookie` header for cookie `name`.
#[must_use]
pub fn set_cookie<'a>(cookies: &'a [String], name: &str) -> Option<&'a str> {
    let prefix = format!("{name}=");
    cookies
        .iter()
        .find(|c| c.starts_with(&prefix))
        .map(String::as_str)
}

/// The `Max-Age` attribute of a `Set-Cookie` value.
#[must_use]
pub fn max_age(set_cookie: &str) -> Option<i64> {
    set_cookie
        .split(';')
        .map(str::trim)
        .find_map(|attr| attr.strip_prefix("Max-Age="))
        .and_then(|v| v.parse().ok())
}

/// The value part of a `Set-Cookie` header.
#[must_use]
pub fn cookie_value(set_cookie: &str) -> &str {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map_or("", |(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_age_parsing() {
        assert_eq!(max_age("token=abc; Path=/; Max-Age=2000"), Some(2000));
        assert_eq!(max_age("token=abc; Path=/"), None);
    }

    #[test]
    fn test_cookie_value() {
        assert_eq!(cookie_value("token=abc; Path=/"), "abc");
        assert_eq!(cookie_value("token=; Max-Age=0"), "");
    }
}
