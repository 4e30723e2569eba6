//! Cart popup view model.
//!
//! The popup is a pure function of the cart snapshot, the session's coupon
//! box toggle and the message catalog. Each render builds a fresh
//! [`CartPopupView`]; the three display decisions the template makes (item
//! list, promo area, checkout control) are resolved here into explicit enums
//! so the template only has to ask simple questions.

use bazaar_core::{Cart, CartItem, CurrencyCode, Price};

use crate::site::Messages;

/// Where the checkout call-to-action navigates when the cart has items.
pub const CHECKOUT_HREF: &str = "/checkout";

/// Caller-supplied presentation overrides.
///
/// The two callbacks are HTMX endpoints: when set, the close button issues a
/// `GET` to `on_close_btn_click` and the checkout button `POST`s to
/// `on_checkout` before navigating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartPopupOptions {
    pub class_name: Option<String>,
    pub style: Option<String>,
    pub on_close_btn_click: Option<String>,
    pub on_checkout: Option<String>,
}

/// One cart line as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    pub product_id: i32,
    pub name: String,
    pub unit: Option<String>,
    pub image: Option<String>,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl CartRowView {
    #[must_use]
    pub fn from_item(item: &CartItem, currency: CurrencyCode) -> Self {
        Self {
            product_id: item.id.as_i32(),
            name: item.name.clone(),
            unit: item.unit.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            unit_price: Price::new(item.unit_price(), currency).rounded().display(),
            line_total: Price::new(item.line_total(), currency).rounded().display(),
        }
    }
}

/// What the item list shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemListState {
    /// The cart is empty; show the placeholder message.
    Empty { message: String },
    /// One row per distinct product, in cart order.
    Items(Vec<CartRowView>),
}

/// What the promo area below the item list shows.
///
/// A discounting coupon always wins over the toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoAreaState {
    /// Collapsed "have a special code?" trigger.
    EnterCode,
    /// Expanded coupon form, optionally with a rejection message.
    CouponEntryOpen { error: Option<String> },
    /// A coupon is applied; show its code.
    CouponApplied { code: String },
}

impl PromoAreaState {
    /// Select the promo area from coupon presence, then the toggle.
    #[must_use]
    pub fn select(cart: &Cart, coupon_box_open: bool) -> Self {
        match cart.coupon() {
            Some(coupon) if coupon.is_discounting() => Self::CouponApplied {
                code: coupon.code.to_string(),
            },
            _ if coupon_box_open => Self::CouponEntryOpen { error: None },
            _ => Self::EnterCode,
        }
    }
}

/// The checkout control at the bottom of the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutAction {
    /// Wrapped in a link to the checkout page.
    Link { href: &'static str },
    /// Rendered as a disabled button with no navigation.
    Inert,
}

impl CheckoutAction {
    #[must_use]
    pub const fn for_count(count: u32) -> Self {
        if count == 0 {
            Self::Inert
        } else {
            Self::Link {
                href: CHECKOUT_HREF,
            }
        }
    }
}

/// Display strings used by the popup template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPopupLabels {
    pub checkout: String,
    pub special_code: String,
    pub coupon_applied: String,
    pub coupon_placeholder: String,
    pub apply: String,
    pub close: String,
}

impl CartPopupLabels {
    fn from_messages(messages: &Messages) -> Self {
        Self {
            checkout: messages.get_or("nav.checkout", "Checkout").to_string(),
            special_code: messages
                .get_or("specialCode", "Have a special code?")
                .to_string(),
            coupon_applied: messages
                .get_or("couponApplied", "Coupon Applied")
                .to_string(),
            coupon_placeholder: messages
                .get_or("couponPlaceholder", "Enter coupon here")
                .to_string(),
            apply: messages.get_or("voucherApply", "Apply").to_string(),
            close: messages.get_or("closeCart", "Close").to_string(),
        }
    }
}

/// Everything the cart popup template renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPopupView {
    pub class_name: String,
    pub style: Option<String>,
    pub on_close_btn_click: Option<String>,
    pub on_checkout: Option<String>,
    pub count: u32,
    /// "item" or "items", agreeing with `count`.
    pub count_label: String,
    pub items: ItemListState,
    pub promo: PromoAreaState,
    pub checkout: CheckoutAction,
    /// Total after any coupon discount, formatted.
    pub total: String,
    pub labels: CartPopupLabels,
}

impl CartPopupView {
    /// Build the popup for a cart snapshot.
    #[must_use]
    pub fn build(
        cart: &Cart,
        coupon_box_open: bool,
        messages: &Messages,
        options: CartPopupOptions,
    ) -> Self {
        let count = cart.cart_items_count();
        let count_label = if count <= 1 {
            messages.get_or("cartItem", "item")
        } else {
            messages.get_or("cartItems", "items")
        }
        .to_string();

        let items = if count == 0 {
            ItemListState::Empty {
                message: messages
                    .get_or("noProductFound", "No products found")
                    .to_string(),
            }
        } else {
            ItemListState::Items(
                cart.items()
                    .iter()
                    .map(|item| CartRowView::from_item(item, cart.currency_code))
                    .collect(),
            )
        };

        Self {
            class_name: options
                .class_name
                .unwrap_or_else(|| "cart-popup".to_string()),
            style: options.style,
            on_close_btn_click: options.on_close_btn_click,
            on_checkout: options.on_checkout,
            count,
            count_label,
            items,
            promo: PromoAreaState::select(cart, coupon_box_open),
            checkout: CheckoutAction::for_count(count),
            total: cart.calculate_price().display(),
            labels: CartPopupLabels::from_messages(messages),
        }
    }

    /// Show `error` in the coupon form.
    ///
    /// Has no effect once a coupon is applied, since the form is not shown.
    #[must_use]
    pub fn with_coupon_error(mut self, error: impl Into<String>) -> Self {
        if !matches!(self.promo, PromoAreaState::CouponApplied { .. }) {
            self.promo = PromoAreaState::CouponEntryOpen {
                error: Some(error.into()),
            };
        }
        self
    }

    // Template helpers

    #[must_use]
    pub fn rows(&self) -> &[CartRowView] {
        match &self.items {
            ItemListState::Items(rows) => rows,
            ItemListState::Empty { .. } => &[],
        }
    }

    #[must_use]
    pub fn empty_message(&self) -> Option<&str> {
        match &self.items {
            ItemListState::Empty { message } => Some(message),
            ItemListState::Items(_) => None,
        }
    }

    #[must_use]
    pub const fn shows_enter_code(&self) -> bool {
        matches!(self.promo, PromoAreaState::EnterCode)
    }

    #[must_use]
    pub const fn shows_coupon_form(&self) -> bool {
        matches!(self.promo, PromoAreaState::CouponEntryOpen { .. })
    }

    #[must_use]
    pub fn coupon_error(&self) -> Option<&str> {
        match &self.promo {
            PromoAreaState::CouponEntryOpen { error } => error.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn applied_code(&self) -> Option<&str> {
        match &self.promo {
            PromoAreaState::CouponApplied { code } => Some(code),
            _ => None,
        }
    }

    #[must_use]
    pub const fn checkout_href(&self) -> Option<&'static str> {
        match self.checkout {
            CheckoutAction::Link { href } => Some(href),
            CheckoutAction::Inert => None,
        }
    }
}
