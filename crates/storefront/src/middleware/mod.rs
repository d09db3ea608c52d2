//! HTTP middleware and extractors for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, no-store caching, etc.)
//! 5. Error pages (re-render with the visitor's nav bar)
//!
//! Sessions are not a layer: [`CookieSession`] and the guards read the
//! `Cookie` header directly when a handler asks for them.

pub mod auth;
pub mod error_page;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    CustomerRole, GuardedRole, LoginRedirect, OptionalSession, RequireCustomer, RequireSeller,
    RequireSession, SellerRole,
};
pub use error_page::error_page_middleware;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{CookieSession, SessionStore};
