//! Order summary shown on the checkout hand-off page.

use bazaar_core::Cart;

use crate::site::Messages;
use crate::views::cart_popup::CartRowView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummaryView {
    pub rows: Vec<CartRowView>,
    pub count: u32,
    pub subtotal: String,
    /// Discount line, present only when a coupon takes something off.
    pub discount: Option<String>,
    pub coupon_code: Option<String>,
    pub total: String,
    pub title: String,
    pub subtotal_label: String,
    pub discount_label: String,
    pub total_label: String,
    pub place_order_label: String,
}

impl OrderSummaryView {
    #[must_use]
    pub fn build(cart: &Cart, messages: &Messages) -> Self {
        let discounting = cart.coupon().filter(|c| c.is_discounting());
        Self {
            rows: cart
                .items()
                .iter()
                .map(|item| CartRowView::from_item(item, cart.currency_code))
                .collect(),
            count: cart.cart_items_count(),
            subtotal: cart.subtotal().rounded().display(),
            discount: discounting.map(|_| format!("-{}", cart.discount().display())),
            coupon_code: discounting.map(|c| c.code.to_string()),
            total: cart.calculate_price().display(),
            title: messages.get_or("orderSummary", "Order Summary").to_string(),
            subtotal_label: messages.get_or("subtotal", "Sub Total").to_string(),
            discount_label: messages.get_or("discount", "Discount").to_string(),
            total_label: messages.get_or("total", "Total").to_string(),
            place_order_label: messages
                .get_or("placeOrder", "Proceed to payment")
                .to_string(),
        }
    }
}
