//! User roles.
//!
//! A session belongs to either a customer or a seller. The role picks the
//! login/register endpoints, the shape of the auth payloads, and which
//! landing page follows a successful login.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a role from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct RoleError(pub String);

/// The kind of account a session belongs to.
///
/// Serialized in lowercase (`customer` / `seller`), which is also the form
/// used in URLs and in the `userType` cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Seller,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Self; 2] = [Self::Customer, Self::Seller];

    /// Lowercase identifier used in paths and cookies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Seller => "seller",
        }
    }

    /// Capitalized label for page headings.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Seller => "Seller",
        }
    }

    /// Path of this role's login page.
    #[must_use]
    pub fn login_path(self) -> String {
        format!("/login/{}", self.as_str())
    }

    /// Path of this role's registration page.
    #[must_use]
    pub fn register_path(self) -> String {
        format!("/register/{}", self.as_str())
    }

    /// Landing page after a successful login.
    #[must_use]
    pub const fn home_path(self) -> &'static str {
        match self {
            Self::Customer => "/customer/profile",
            Self::Seller => "/seller/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "seller" => Ok(Self::Seller),
            other => Err(RoleError(other.to_string())),
        }
    }
}
