//! Bazaar Core - Shared domain types.
//!
//! This crate provides the types shared by the Bazaar components:
//! - `storefront` - Server-rendered category pages and cart popup
//! - `integration-tests` - Router-level tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain logic - no I/O, no HTTP,
//! no session handling. Cart arithmetic lives here so it can be tested without
//! a running server.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, device classification, cart and coupons

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
