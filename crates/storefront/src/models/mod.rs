//! Session-backed models for storefront.
//!
//! The storefront has no database; the only per-visitor state is what lives
//! in the session (see [`session`]).

pub mod session;

pub use session::{cart_token, coupon_box_open, load_scroll_effect, save_scroll_effect, toggle_coupon_box};
