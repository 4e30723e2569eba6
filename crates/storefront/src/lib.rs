//! Bazaar storefront library.
//!
//! Server-rendered category pages and the cart popup, built with Axum,
//! Askama and HTMX. The binary in `main.rs` adds configuration loading,
//! tracing and Sentry on top of [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod site;
pub mod state;
pub mod views;

use axum::{Router, extract::Request, middleware::from_fn};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Directory of static assets bundled with the crate.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the storefront router with its middleware stack.
///
/// Layers run top to bottom: tracing, request ID, then sessions.
pub fn app(state: AppState) -> Router {
    let layers = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(from_fn(middleware::request_id_middleware))
        .layer(middleware::create_session_layer(state.config()));

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(layers)
        .with_state(state)
}
