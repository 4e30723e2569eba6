//! Coupon codes and applied coupons.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CouponCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CouponCodeError {
    /// The input is empty after trimming.
    #[error("coupon code cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("coupon code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains characters other than ASCII letters, digits, `-` and `_`.
    #[error("coupon code contains invalid characters")]
    InvalidCharacters,
}

/// A normalized coupon code.
///
/// Codes are trimmed and uppercased on parse so lookups are case-insensitive.
///
/// ## Examples
///
/// ```
/// use bazaar_core::CouponCode;
///
/// let code = CouponCode::parse("  save10 ").unwrap();
/// assert_eq!(code.as_str(), "SAVE10");
///
/// assert!(CouponCode::parse("").is_err());
/// assert!(CouponCode::parse("no spaces").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Maximum code length.
    pub const MAX_LENGTH: usize = 32;

    /// Parse and normalize a coupon code.
    ///
    /// # Errors
    ///
    /// Returns [`CouponCodeError`] if the code is empty, too long, or contains
    /// characters outside `[A-Za-z0-9_-]`.
    pub fn parse(s: &str) -> Result<Self, CouponCodeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CouponCodeError::Empty);
        }
        if trimmed.len() > Self::MAX_LENGTH {
            return Err(CouponCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CouponCodeError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CouponCode {
    type Err = CouponCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CouponCode {
    type Error = CouponCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CouponCode> for String {
    fn from(code: CouponCode) -> Self {
        code.0
    }
}

/// A coupon attached to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: CouponCode,
    /// Percentage taken off the cart subtotal. Zero means no discount.
    pub discount_in_percent: u8,
}

impl Coupon {
    #[must_use]
    pub const fn new(code: CouponCode, discount_in_percent: u8) -> Self {
        Self {
            code,
            discount_in_percent,
        }
    }

    /// Whether this coupon actually reduces the total.
    ///
    /// A coupon without a discount is displayed as if no coupon were applied.
    #[must_use]
    pub const fn is_discounting(&self) -> bool {
        self.discount_in_percent > 0
    }
}
