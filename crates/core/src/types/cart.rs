//! Cart contents and price arithmetic.
//!
//! A [`Cart`] is a plain value. The storefront keeps one per visitor in its
//! cart store and mutates it only through the intents defined here
//! (`add_item`, `remove_item`, `remove_item_from_cart`, `apply_coupon`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::coupon::Coupon;
use super::id::ProductId;
use super::price::{CurrencyCode, Price};

/// A product line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    /// Sell unit shown under the name (e.g. "1 lb", "12 pc(s)").
    pub unit: Option<String>,
    pub image: Option<String>,
    pub price: Decimal,
    /// Discounted price; takes precedence over `price` when set.
    pub sale_price: Option<Decimal>,
    pub quantity: u32,
}

impl CartItem {
    /// The price charged per unit.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.price)
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}

/// A visitor's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Cart {
    pub currency_code: CurrencyCode,
    items: Vec<CartItem>,
    coupon: Option<Coupon>,
}

impl Cart {
    /// Create an empty cart priced in `currency_code`.
    #[must_use]
    pub const fn new(currency_code: CurrencyCode) -> Self {
        Self {
            currency_code,
            items: Vec::new(),
            coupon: None,
        }
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The applied coupon, if any.
    #[must_use]
    pub const fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    #[must_use]
    pub fn get_item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Add `quantity` units of `item`.
    ///
    /// If the product is already in the cart its quantity is increased;
    /// otherwise a new line is appended. The `quantity` field of `item` is
    /// ignored. Adding zero units is a no-op.
    pub fn add_item(&mut self, item: &CartItem, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return;
        }
        self.items.push(CartItem {
            quantity,
            ..item.clone()
        });
    }

    /// Remove `quantity` units of a product.
    ///
    /// A line whose quantity reaches zero is dropped. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: ProductId, quantity: u32) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == id) {
            existing.quantity = existing.quantity.saturating_sub(quantity);
        }
        self.items.retain(|i| i.quantity > 0);
    }

    /// Remove a product line regardless of its quantity.
    pub fn remove_item_from_cart(&mut self, id: ProductId) {
        self.items.retain(|i| i.id != id);
    }

    /// Attach a coupon, replacing any previous one.
    pub fn apply_coupon(&mut self, coupon: Coupon) {
        self.coupon = Some(coupon);
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn cart_items_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, item| acc.saturating_add(item.quantity))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart_items_count() == 0
    }

    /// Sum of line totals before any coupon.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let amount = self.items.iter().map(CartItem::line_total).sum();
        Price::new(amount, self.currency_code)
    }

    /// Amount taken off the subtotal by the applied coupon.
    #[must_use]
    pub fn discount(&self) -> Price {
        let percent = self
            .coupon
            .as_ref()
            .filter(|c| c.is_discounting())
            .map_or(0, |c| c.discount_in_percent.min(100));
        let amount = self.subtotal().amount * Decimal::from(percent) / Decimal::ONE_HUNDRED;
        Price::new(amount, self.currency_code).rounded()
    }

    /// Total payable: subtotal minus coupon discount, rounded to cents.
    #[must_use]
    pub fn calculate_price(&self) -> Price {
        let subtotal = self.subtotal().rounded();
        Price::new(subtotal.amount - self.discount().amount, self.currency_code)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::coupon::CouponCode;

    fn item(id: i32, price: &str, sale_price: Option<&str>) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            unit: None,
            image: None,
            price: price.parse().unwrap(),
            sale_price: sale_price.map(|p| p.parse().unwrap()),
            quantity: 1,
        }
    }

    #[test]
    fn test_add_item_merges_existing_line() {
        let mut cart = Cart::default();
        let apple = item(1, "2.50", None);
        cart.add_item(&apple, 1);
        cart.add_item(&apple, 2);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.cart_items_count(), 3);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = Cart::default();
        cart.add_item(&item(1, "1.00", None), 0);
        assert!(cart.is_empty());
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_remove_item_drops_line_at_zero() {
        let mut cart = Cart::default();
        let apple = item(1, "2.50", None);
        cart.add_item(&apple, 2);
        cart.remove_item(apple.id, 1);
        assert_eq!(cart.get_item(apple.id).unwrap().quantity, 1);
        cart.remove_item(apple.id, 1);
        assert!(cart.get_item(apple.id).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item_from_cart_ignores_quantity() {
        let mut cart = Cart::default();
        cart.add_item(&item(1, "2.50", None), 5);
        cart.add_item(&item(2, "1.00", None), 1);
        cart.remove_item_from_cart(ProductId::new(1));
        assert_eq!(cart.cart_items_count(), 1);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut cart = Cart::default();
        cart.add_item(&item(1, "2.50", None), 1);
        cart.remove_item(ProductId::new(99), 1);
        cart.remove_item_from_cart(ProductId::new(99));
        assert_eq!(cart.cart_items_count(), 1);
    }

    #[test]
    fn test_total_uses_sale_price() {
        let mut cart = Cart::default();
        cart.add_item(&item(1, "10.00", Some("8.00")), 2);
        cart.add_item(&item(2, "3.25", None), 1);
        assert_eq!(cart.calculate_price().display(), "$19.25");
    }

    #[test]
    fn test_coupon_discount_is_applied_and_rounded() {
        let mut cart = Cart::default();
        cart.add_item(&item(1, "9.99", None), 1);
        cart.apply_coupon(Coupon::new(CouponCode::parse("SAVE15").unwrap(), 15));
        // 9.99 * 15% = 1.4985 -> 1.50
        assert_eq!(cart.discount().display(), "$1.50");
        assert_eq!(cart.calculate_price().display(), "$8.49");
    }

    #[test]
    fn test_zero_percent_coupon_changes_nothing() {
        let mut cart = Cart::default();
        cart.add_item(&item(1, "4.00", None), 1);
        cart.apply_coupon(Coupon::new(CouponCode::parse("NOTHING").unwrap(), 0));
        assert_eq!(cart.calculate_price().display(), "$4.00");
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new(CurrencyCode::EUR);
        assert_eq!(cart.calculate_price().display(), "€0.00");
    }
}
