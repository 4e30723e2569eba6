//! Checkout hand-off page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::models::session::cart_token;
use crate::state::AppState;
use crate::views::OrderSummaryView;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutShowTemplate {
    pub summary: OrderSummaryView,
}

/// Show the order summary. An empty cart has nothing to check out.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let token = cart_token(&session).await?;
    let cart = state.carts().get(token).await;
    if cart.is_empty() {
        tracing::debug!("Checkout with empty cart, redirecting");
        return Ok(Redirect::to("/").into_response());
    }

    let summary = OrderSummaryView::build(&cart, state.site().messages());
    Ok(CheckoutShowTemplate { summary }.into_response())
}
