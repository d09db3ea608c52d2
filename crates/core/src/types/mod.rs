//! Core types for H-Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod price;
pub mod role;
pub mod status;

pub use category::ProductCategory;
pub use id::*;
pub use price::Price;
pub use role::{Role, RoleError};
pub use status::ProductStatus;
