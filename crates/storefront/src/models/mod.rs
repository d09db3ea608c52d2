//! Domain models for storefront.
//!
//! The storefront owns no persistent data. Products, carts, orders and
//! accounts are typed in [`crate::api::types`]; the only state kept on the
//! storefront side is the session in the visitor's cookies.

pub mod session;

pub use session::{DEFAULT_SESSION_TTL, Session, SessionToken, keys as session_keys, session_ttl};
