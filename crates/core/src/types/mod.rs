//! Core types for Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod coupon;
pub mod device;
pub mod id;
pub mod price;

pub use cart::{Cart, CartItem};
pub use coupon::{Coupon, CouponCode, CouponCodeError};
pub use device::DeviceType;
pub use id::*;
pub use price::{CurrencyCode, Price};
