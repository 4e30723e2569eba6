//! Category page handlers.
//!
//! A full page load mounts the page: the scroll effect starts over and fires
//! for whatever filters the URL carries. Search and category changes arrive
//! as HTMX requests and re-render only the main content; the scroll effect
//! then fires only if `text` or `category` actually changed. Both shapes
//! share a URL, so responses carry `Vary: HX-Request`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::VARY},
    response::{AppendHeaders, IntoResponse, Response},
};
use bazaar_core::DeviceType;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::ProductQuery;
use crate::error::Result;
use crate::filters;
use crate::middleware::Device;
use crate::models::session::{load_scroll_effect, save_scroll_effect};
use crate::routes::cart::build_popup;
use crate::routes::wants_fragment;
use crate::state::AppState;
use crate::views::{CartPopupView, CategoryPageView, ProductGridView, ScrollEffect, SearchParams};

/// Category page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub text: Option<String>,
    pub category: Option<String>,
    pub offset: Option<usize>,
}

impl CategoryQuery {
    fn search_params(&self) -> SearchParams {
        SearchParams::new(self.text.as_deref(), self.category.as_deref())
    }
}

/// Header value naming the request header that selects the response shape.
const VARY_HX_REQUEST: &str = "HX-Request";

/// Full category page template.
#[derive(Template, WebTemplate)]
#[template(path = "category/show.html")]
pub struct CategoryShowTemplate {
    pub page: CategoryPageView,
    pub grid: ProductGridView,
    pub popup: CartPopupView,
}

/// Sidebar and product grid, swapped in on search or category change.
///
/// The mobile navigation block rides along out of band so its sidebar
/// tracks the selected category.
#[derive(Template, WebTemplate)]
#[template(path = "partials/main_content_swap.html")]
pub struct MainContentTemplate {
    pub page: CategoryPageView,
    pub grid: ProductGridView,
}

/// Product cards plus the next "load more" button.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_cards.html")]
pub struct ProductCardsTemplate {
    pub grid: ProductGridView,
}

/// Render a category page.
///
/// Unknown page types produce an empty 404 response.
#[instrument(skip(state, session, headers))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Device(device): Device,
    headers: HeaderMap,
    Path(page_type): Path<String>,
    Query(query): Query<CategoryQuery>,
) -> Result<Response> {
    let Some(page) = CategoryPageView::resolve(state.site(), &page_type, device) else {
        tracing::debug!(page_type = %page_type, "Unknown page type");
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let fragment = wants_fragment(&headers);
    let params = query.search_params();

    let mut effect = if fragment {
        load_scroll_effect(&session, &page_type).await?
    } else {
        ScrollEffect::default()
    };
    let scroll = effect.run(&params);
    save_scroll_effect(&session, &page_type, &effect).await?;
    if scroll.is_some() {
        tracing::debug!(page_type = %page_type, runs = effect.runs(), "Scroll realignment requested");
    }

    let grid = product_grid(&state, &page_type, device, &params, query.offset.unwrap_or(0)).await?;
    let page = page.with_search(state.site(), params).with_scroll(scroll);

    let vary = AppendHeaders([(VARY, VARY_HX_REQUEST)]);
    if fragment {
        return Ok((vary, MainContentTemplate { page, grid }).into_response());
    }

    let popup = build_popup(&state, &session).await?;
    Ok((vary, CategoryShowTemplate { page, grid, popup }).into_response())
}

/// Render the next page of product cards.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Device(device): Device,
    Path(page_type): Path<String>,
    Query(query): Query<CategoryQuery>,
) -> Result<Response> {
    if !state.site().pages().contains(&page_type) {
        tracing::debug!(page_type = %page_type, "Unknown page type");
        return Ok(StatusCode::NOT_FOUND.into_response());
    }

    let params = query.search_params();
    let grid = product_grid(&state, &page_type, device, &params, query.offset.unwrap_or(0)).await?;
    Ok(ProductCardsTemplate { grid }.into_response())
}

async fn product_grid(
    state: &AppState,
    page_type: &str,
    device: DeviceType,
    params: &SearchParams,
    offset: usize,
) -> Result<ProductGridView> {
    let catalog = state.catalog().get().await?;
    let page = catalog.query(
        &ProductQuery::new(page_type)
            .with_text(params.text.as_deref())
            .with_category(params.category.as_deref())
            .with_offset(offset),
    );
    Ok(ProductGridView::build(
        page_type,
        device,
        params,
        &page,
        state.config().currency,
        state.site().messages(),
    ))
}
