//! Session-related types.
//!
//! A session is nothing more than the opaque token the backend issued on
//! login plus the role it was issued for. Both live in client cookies.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use secrecy::{ExposeSecret, SecretString};

use hstore_core::Role;

/// Lifetime of a session when the login response carries no usable expiry.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

/// Opaque session token issued by the backend.
///
/// Sent back to the API in the `token` header. Implements `Debug` manually
/// to keep the value out of logs.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wrap a raw token value.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(SecretString::from(raw.into()))
    }

    /// The raw token, for headers and cookies only.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

/// The current visitor's session, as read back from the cookie store.
#[derive(Debug, Clone)]
pub struct Session {
    /// Token to present to the API.
    pub token: SessionToken,
    /// Role tag written at login. `None` if the cookie is missing or garbled.
    pub role: Option<Role>,
}

/// Cookie names used to persist the session.
pub mod keys {
    /// Cookie holding the session token.
    pub const TOKEN: &str = "token";

    /// Cookie holding the role the token was issued for.
    pub const USER_TYPE: &str = "userType";
}

/// Compute how long a new session should live.
///
/// `session_end` is the backend's `sessionEndTime`. When it parses and lies
/// at least a whole second after `now`, the TTL is the whole number of
/// seconds until then; otherwise [`DEFAULT_SESSION_TTL`].
#[must_use]
pub fn session_ttl(session_end: Option<&str>, now: DateTime<Utc>) -> Duration {
    session_end
        .and_then(parse_session_end)
        .map(|end| (end - now).num_seconds())
        .and_then(|secs| u64::try_from(secs).ok())
        .filter(|&secs| secs > 0)
        .map_or(DEFAULT_SESSION_TTL, Duration::from_secs)
}

/// Parse a `sessionEndTime` value.
///
/// Accepts RFC 3339 timestamps, and offset-less ISO timestamps as produced by
/// a Java `LocalDateTime`, which are taken to be in the server's local zone.
fn parse_session_end(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_ttl_from_session_end_time() {
        let end = (now() + TimeDelta::seconds(2000)).to_rfc3339();
        assert_eq!(session_ttl(Some(&end), now()), Duration::from_secs(2000));
    }

    #[test]
    fn test_ttl_floors_fractional_seconds() {
        let end = (now() + TimeDelta::milliseconds(2_000_900)).to_rfc3339();
        assert_eq!(session_ttl(Some(&end), now()), Duration::from_secs(2000));
    }

    #[test]
    fn test_ttl_defaults_without_session_end_time() {
        assert_eq!(session_ttl(None, now()), Duration::from_secs(3600));
    }

    #[test]
    fn test_ttl_defaults_when_already_expired() {
        let end = (now() - TimeDelta::seconds(10)).to_rfc3339();
        assert_eq!(session_ttl(Some(&end), now()), DEFAULT_SESSION_TTL);
    }

    #[test]
    fn test_ttl_defaults_when_under_a_second_left() {
        let end = (now() + TimeDelta::milliseconds(400)).to_rfc3339();
        assert_eq!(session_ttl(Some(&end), now()), DEFAULT_SESSION_TTL);
    }

    #[test]
    fn test_ttl_defaults_on_garbage() {
        assert_eq!(session_ttl(Some("tomorrow-ish"), now()), DEFAULT_SESSION_TTL);
    }

    #[test]
    fn test_parse_local_date_time_without_offset() {
        let expected = Local
            .with_ymd_and_hms(2025, 3, 1, 12, 30, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            parse_session_end("2025-03-01T12:30:00.123").map(|d| d.timestamp()),
            Some(expected.timestamp())
        );
        assert!(parse_session_end("2025-03-01T12:30:00").is_some());
    }

    #[test]
    fn test_session_token_debug_is_redacted() {
        let token = SessionToken::new("abc123");
        assert_eq!(format!("{token:?}"), "SessionToken([REDACTED])");
        assert_eq!(token.expose(), "abc123");
    }
}
