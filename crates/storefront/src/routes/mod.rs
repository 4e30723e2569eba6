//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Redirect to the first navigation entry
//! GET  /health                   - Health check
//!
//! # Category pages
//! GET  /{page_type}              - Category page (main content fragment for HTMX)
//! GET  /{page_type}/products     - Product grid "load more" fragment
//!
//! # Cart (HTMX fragments)
//! GET  /cart/popup               - Cart popup
//! GET  /cart/count               - Cart count badge
//! POST /cart/add                 - Add a product (returns popup, triggers cart-updated)
//! POST /cart/increment           - Add one unit
//! POST /cart/decrement           - Remove one unit
//! POST /cart/remove              - Remove a line
//! POST /cart/coupon/toggle       - Expand or collapse the coupon form
//! POST /cart/coupon              - Apply a coupon code
//!
//! # Checkout
//! GET  /checkout                 - Order summary hand-off page
//! ```

pub mod cart;
pub mod category;
pub mod checkout;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::state::AppState;

/// Header HTMX sets on every request it issues.
const HX_REQUEST: &str = "hx-request";

/// Header HTMX adds when restoring history it no longer has cached.
const HX_HISTORY_RESTORE_REQUEST: &str = "hx-history-restore-request";

fn header_is_true(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Whether the request was issued by HTMX (as opposed to a full page load).
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    header_is_true(headers, HX_REQUEST)
}

/// Whether the response should be a fragment rather than a full document.
///
/// A history restore arrives from HTMX but replaces the whole page.
pub(crate) fn wants_fragment(headers: &HeaderMap) -> bool {
    is_htmx(headers) && !header_is_true(headers, HX_HISTORY_RESTORE_REQUEST)
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/popup", get(cart::popup))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
        .route("/coupon", post(cart::apply_coupon))
        .route("/coupon/toggle", post(cart::toggle_coupon))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        // Cart routes
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show))
        // Category pages (static segments above take precedence)
        .route("/{page_type}", get(category::show))
        .route("/{page_type}/products", get(category::products))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Send visitors to the first category in the navigation menu.
async fn home(State(state): State<AppState>) -> Response {
    state.site().navigation().first().map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |item| Redirect::to(&item.href).into_response(),
    )
}
