//! Cookie-backed session store.
//!
//! The session is two plain cookies, `token` and `userType`, both on `/`.
//! Every read parses the request's `Cookie` header; every write becomes a
//! `Set-Cookie` header on the response. The cookies are not `HttpOnly`.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use hstore_core::Role;

use crate::models::{Session, SessionToken, session_keys};

/// Access to the visitor's session.
///
/// Reads never fail; a missing or empty value is simply absent.
pub trait SessionStore {
    /// Persist `token` and `role` for `ttl`, replacing any existing session.
    fn create_session(&mut self, token: &SessionToken, role: Role, ttl: Duration);

    /// The stored token, if any.
    fn read_token(&self) -> Option<SessionToken>;

    /// The stored role tag, if any.
    fn read_role(&self) -> Option<Role>;

    /// Remove both fields immediately.
    fn clear_session(&mut self);

    /// The current session, present iff a token is.
    fn current(&self) -> Option<Session> {
        self.read_token().map(|token| Session {
            token,
            role: self.read_role(),
        })
    }
}

/// [`SessionStore`] over the request/response cookie jar.
///
/// Extract it in a handler and return it as part of the response so that
/// any writes reach the browser:
///
/// ```rust,ignore
/// async fn logout(mut session: CookieSession) -> (CookieSession, Redirect) {
///     session.clear_session();
///     (session, Redirect::to("/"))
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CookieSession {
    jar: CookieJar,
}

impl CookieSession {
    /// Wrap an existing jar.
    #[must_use]
    pub const fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    fn value(&self, name: &str) -> Option<&str> {
        self.jar
            .get(name)
            .map(Cookie::value)
            .filter(|v| !v.is_empty())
    }

    fn set(&mut self, cookie: Cookie<'static>) {
        self.jar = std::mem::take(&mut self.jar).add(cookie);
    }

    fn unset(&mut self, name: &'static str) {
        self.jar = std::mem::take(&mut self.jar).remove(Cookie::build(name).path("/"));
    }
}

fn session_cookie(name: &'static str, value: String, ttl: Duration) -> Cookie<'static> {
    let max_age = time::Duration::try_from(ttl).unwrap_or(time::Duration::MAX);

    Cookie::build((name, value))
        .path("/")
        .max_age(max_age)
        .same_site(SameSite::Lax)
        .http_only(false)
        .build()
}

impl SessionStore for CookieSession {
    fn create_session(&mut self, token: &SessionToken, role: Role, ttl: Duration) {
        self.set(session_cookie(
            session_keys::TOKEN,
            token.expose().to_owned(),
            ttl,
        ));
        self.set(session_cookie(
            session_keys::USER_TYPE,
            role.as_str().to_owned(),
            ttl,
        ));
    }

    fn read_token(&self) -> Option<SessionToken> {
        self.value(session_keys::TOKEN).map(SessionToken::new)
    }

    fn read_role(&self) -> Option<Role> {
        self.value(session_keys::USER_TYPE)
            .and_then(|v| v.parse().ok())
    }

    fn clear_session(&mut self) {
        self.unset(session_keys::TOKEN);
        self.unset(session_keys::USER_TYPE);
    }
}

impl<S> FromRequestParts<S> for CookieSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new(CookieJar::from_headers(&parts.headers)))
    }
}

impl IntoResponseParts for CookieSession {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.jar.into_response_parts(res)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};
    use axum::response::IntoResponse;

    use super::*;

    fn session_from(cookie_header: &str) -> CookieSession {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie_header).unwrap());
        CookieSession::new(CookieJar::from_headers(&headers))
    }

    fn set_cookies(session: CookieSession) -> Vec<String> {
        let response = (session, "ok").into_response();
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_reads_token_and_role() {
        let session = session_from("token=abc123; userType=seller");
        assert_eq!(session.read_token().unwrap().expose(), "abc123");
        assert_eq!(session.read_role(), Some(Role::Seller));

        let current = session.current().unwrap();
        assert_eq!(current.role, Some(Role::Seller));
    }

    #[test]
    fn test_empty_token_reads_as_absent() {
        let session = session_from("token=; userType=customer");
        assert!(session.read_token().is_none());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_missing_cookies_read_as_absent() {
        let session = CookieSession::default();
        assert!(session.read_token().is_none());
        assert!(session.read_role().is_none());
    }

    #[test]
    fn test_unknown_role_reads_as_absent() {
        let session = session_from("token=abc; userType=admin");
        assert!(session.read_role().is_none());
        assert!(session.current().unwrap().role.is_none());
    }

    #[test]
    fn test_create_session_sets_both_cookies() {
        let mut session = CookieSession::default();
        session.create_session(
            &SessionToken::new("tok"),
            Role::Customer,
            Duration::from_secs(2000),
        );

        assert_eq!(session.read_token().unwrap().expose(), "tok");
        assert_eq!(session.read_role(), Some(Role::Customer));

        let cookies = set_cookies(session);
        assert_eq!(cookies.len(), 2);
        let token = cookies.iter().find(|c| c.starts_with("token=")).unwrap();
        assert!(token.contains("Max-Age=2000"));
        assert!(token.contains("Path=/"));
        assert!(!token.contains("HttpOnly"));
        let role = cookies.iter().find(|c| c.starts_with("userType=")).unwrap();
        assert!(role.starts_with("userType=customer"));
        assert!(role.contains("Max-Age=2000"));
    }

    #[test]
    fn test_create_session_overwrites_existing() {
        let mut session = session_from("token=old; userType=seller");
        session.create_session(&SessionToken::new("new"), Role::Customer, Duration::from_secs(60));
        assert_eq!(session.read_token().unwrap().expose(), "new");
        assert_eq!(session.read_role(), Some(Role::Customer));
    }

    #[test]
    fn test_clear_session_expires_both_cookies() {
        let mut session = session_from("token=abc; userType=customer");
        session.clear_session();

        assert!(session.read_token().is_none());
        assert!(session.read_role().is_none());

        let cookies = set_cookies(session);
        assert_eq!(cookies.len(), 2);
        for cookie in &cookies {
            assert!(cookie.contains("Max-Age=0"), "{cookie}");
            assert!(cookie.contains("Path=/"), "{cookie}");
        }
    }
}
