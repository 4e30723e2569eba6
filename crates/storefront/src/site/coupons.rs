//! Redeemable coupon codes.

use std::collections::HashMap;

use bazaar_core::{Coupon, CouponCode};
use serde::Deserialize;

use super::ContentError;

/// A coupon as configured in `coupons.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponDefinition {
    pub code: CouponCode,
    pub discount_in_percent: u8,
}

/// Known coupons keyed by normalized code.
#[derive(Debug, Clone, Default)]
pub struct CouponBook {
    coupons: HashMap<CouponCode, Coupon>,
}

impl CouponBook {
    /// Build a coupon book, validating each definition.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Invalid`] for a discount outside `1..=100` or a
    /// duplicated code.
    pub fn new(definitions: Vec<CouponDefinition>) -> Result<Self, ContentError> {
        let mut coupons = HashMap::with_capacity(definitions.len());
        for def in definitions {
            if !(1..=100).contains(&def.discount_in_percent) {
                return Err(ContentError::Invalid(format!(
                    "coupon {} has discount {}%, expected 1-100",
                    def.code, def.discount_in_percent
                )));
            }
            let coupon = Coupon::new(def.code.clone(), def.discount_in_percent);
            if coupons.insert(def.code.clone(), coupon).is_some() {
                return Err(ContentError::Invalid(format!(
                    "coupon {} is defined twice",
                    def.code
                )));
            }
        }
        Ok(Self { coupons })
    }

    /// Look up a code as typed by a visitor.
    ///
    /// Malformed input is treated the same as an unknown code.
    #[must_use]
    pub fn redeem(&self, input: &str) -> Option<Coupon> {
        let code = CouponCode::parse(input).ok()?;
        self.coupons.get(&code).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}
