//! H-Store Core - Shared types library.
//!
//! This crate provides common types used across all H-Store components:
//! - `storefront` - Server-rendered storefront backed by the remote REST API
//! - `integration-tests` - End-to-end tests against a fake API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. The backend
//! API owns every resource; these types only give its JSON a typed shape.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, roles and catalog enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
