//! View models: plain structs built from site content, the catalog and cart
//! snapshots, ready for the Askama templates to render.

pub mod cart_popup;
pub mod category;
pub mod checkout;
pub mod product_grid;
pub mod scroll;

pub use cart_popup::{
    CartPopupOptions, CartPopupView, CartRowView, CheckoutAction, ItemListState, PromoAreaState,
};
pub use category::CategoryPageView;
pub use checkout::OrderSummaryView;
pub use product_grid::{ProductCardView, ProductGridView};
pub use scroll::{ScrollEffect, ScrollRequest, SearchParams};
