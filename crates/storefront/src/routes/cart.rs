//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation responds with the refreshed popup and an `HX-Trigger:
//! cart-updated` header so other widgets (the count badge) can refresh.
//! Malformed form bodies are rejected with 400.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use bazaar_core::{CartItem, CartToken, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, AppForm, Result, add_breadcrumb};
use crate::models::session::{cart_token, coupon_box_open, toggle_coupon_box};
use crate::state::AppState;
use crate::views::{CartPopupOptions, CartPopupView};

/// Event name sent in `HX-Trigger` after a cart mutation.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    pub quantity: Option<u32>,
}

/// Form data for the single-product intents.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: i32,
}

/// Coupon entry form data.
#[derive(Debug, Deserialize)]
pub struct CouponForm {
    pub code: String,
}

/// Cart popup fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_popup.html")]
pub struct CartPopupTemplate {
    pub popup: CartPopupView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Popup options used by the storefront's own pages.
fn popup_options() -> CartPopupOptions {
    CartPopupOptions {
        class_name: Some("cart-popup cart-popup--drawer".to_string()),
        ..CartPopupOptions::default()
    }
}

/// Build the popup view for the visitor's current cart.
pub(crate) async fn build_popup(state: &AppState, session: &Session) -> Result<CartPopupView> {
    let token = cart_token(session).await?;
    let cart = state.carts().get(token).await;
    let open = coupon_box_open(session).await?;
    Ok(CartPopupView::build(
        &cart,
        open,
        state.site().messages(),
        popup_options(),
    ))
}

fn updated(popup: CartPopupView) -> Response {
    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartPopupTemplate { popup },
    )
        .into_response()
}

/// Resolve a posted product id against the catalog.
async fn cart_item(state: &AppState, product_id: i32) -> Result<CartItem> {
    let catalog = state.catalog().get().await?;
    catalog
        .get(ProductId::new(product_id))
        .map(CartItem::from)
        .ok_or_else(|| AppError::BadRequest(format!("unknown product {product_id}")))
}

/// Display the cart popup.
#[instrument(skip(state, session))]
pub async fn popup(State(state): State<AppState>, session: Session) -> Result<CartPopupTemplate> {
    Ok(CartPopupTemplate {
        popup: build_popup(&state, &session).await?,
    })
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<CartCountTemplate> {
    let token = cart_token(&session).await?;
    let count = state.carts().get(token).await.cart_items_count();
    Ok(CartCountTemplate { count })
}

/// Add a product to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    AppForm(form): AppForm<AddToCartForm>,
) -> Result<Response> {
    let item = cart_item(&state, form.product_id).await?;
    let token = cart_token(&session).await?;
    let quantity = form.quantity.unwrap_or(1).max(1);
    state.carts().add_item(token, &item, quantity).await;
    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Added item", Some(&[("product_id", product_id.as_str())]));
    Ok(updated(build_popup(&state, &session).await?))
}

/// Add one unit of a product already in the cart.
#[instrument(skip(state, session))]
pub async fn increment(
    State(state): State<AppState>,
    session: Session,
    AppForm(form): AppForm<ProductForm>,
) -> Result<Response> {
    let item = cart_item(&state, form.product_id).await?;
    let token = cart_token(&session).await?;
    state.carts().add_item(token, &item, 1).await;
    Ok(updated(build_popup(&state, &session).await?))
}

/// Remove one unit; the line disappears when its quantity reaches zero.
#[instrument(skip(state, session))]
pub async fn decrement(
    State(state): State<AppState>,
    session: Session,
    AppForm(form): AppForm<ProductForm>,
) -> Result<Response> {
    let token = known_product_token(&state, &session, form.product_id).await?;
    state
        .carts()
        .remove_item(token, ProductId::new(form.product_id))
        .await;
    Ok(updated(build_popup(&state, &session).await?))
}

/// Remove a product line entirely.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    AppForm(form): AppForm<ProductForm>,
) -> Result<Response> {
    let token = known_product_token(&state, &session, form.product_id).await?;
    state
        .carts()
        .remove_item_from_cart(token, ProductId::new(form.product_id))
        .await;
    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Removed item", Some(&[("product_id", product_id.as_str())]));
    Ok(updated(build_popup(&state, &session).await?))
}

/// Flip the coupon box toggle.
#[instrument(skip(session, state))]
pub async fn toggle_coupon(
    State(state): State<AppState>,
    session: Session,
) -> Result<CartPopupTemplate> {
    let open = toggle_coupon_box(&session).await?;
    tracing::debug!(open, "Coupon box toggled");
    Ok(CartPopupTemplate {
        popup: build_popup(&state, &session).await?,
    })
}

/// Apply a coupon code.
///
/// Unknown codes are not an error: the form is re-rendered with a message.
#[instrument(skip(state, session, form))]
pub async fn apply_coupon(
    State(state): State<AppState>,
    session: Session,
    AppForm(form): AppForm<CouponForm>,
) -> Result<Response> {
    let Some(coupon) = state.site().coupons().redeem(&form.code) else {
        tracing::debug!("Rejected coupon code");
        let message = state
            .site()
            .messages()
            .get_or("invalidCoupon", "Invalid coupon code")
            .to_string();
        let popup = build_popup(&state, &session).await?.with_coupon_error(message);
        return Ok(CartPopupTemplate { popup }.into_response());
    };

    let token = cart_token(&session).await?;
    add_breadcrumb("cart", "Applied coupon", Some(&[("code", coupon.code.as_str())]));
    state.carts().apply_coupon(token, coupon).await;
    Ok(updated(build_popup(&state, &session).await?))
}

/// Cart token for an intent naming an existing product.
async fn known_product_token(
    state: &AppState,
    session: &Session,
    product_id: i32,
) -> Result<CartToken> {
    let catalog = state.catalog().get().await?;
    if catalog.get(ProductId::new(product_id)).is_none() {
        return Err(AppError::BadRequest(format!("unknown product {product_id}")));
    }
    Ok(cart_token(session).await?)
}
