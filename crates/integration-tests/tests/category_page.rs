//! Integration tests for category pages.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use bazaar_integration_tests::{MOBILE_UA, TestClient};

// =============================================================================
// Page Resolution
// =============================================================================

#[tokio::test]
async fn test_unknown_page_type_renders_nothing() {
    let mut client = TestClient::new();
    let response = client.get("/nonexistent").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_electronics_seo_title() {
    let mut client = TestClient::new();
    let response = client.get("/electronics").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<title>Electronics</title>"));
    assert!(response.body.contains("<meta name=\"description\""));
}

#[tokio::test]
async fn test_recognized_page_has_each_region_once() {
    let mut client = TestClient::new();
    let response = client.get("/grocery").await;
    assert_eq!(response.status, StatusCode::OK);

    for component in ["modal-host", "banner", "store-nav", "carousel", "product-grid", "cart-popup"] {
        assert_eq!(response.components(component), 1, "{component} should appear once");
    }
}

#[tokio::test]
async fn test_regions_render_in_order() {
    let mut client = TestClient::new();
    let body = client.get("/grocery").await.body;
    let position = |name: &str| body.find(&format!("data-component=\"{name}\"")).unwrap();

    assert!(position("modal-host") < position("banner"));
    assert!(position("banner") < position("mobile-block"));
    assert!(position("mobile-block") < position("carousel"));
    assert!(position("carousel") < position("product-grid"));
    assert!(position("product-grid") < position("cart-popup"));
}

#[tokio::test]
async fn test_home_redirects_to_first_category() {
    let mut client = TestClient::new();
    let response = client.get("/").await;
    assert!(response.status.is_redirection());
    assert_eq!(response.header("location"), Some("/grocery"));
}

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new();
    let response = client.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
    assert!(response.header("x-request-id").is_some());
}

#[tokio::test]
async fn test_page_and_fragment_responses_vary_on_htmx() {
    let mut client = TestClient::new();
    let full = client.get("/grocery?text=lime").await;
    assert_eq!(full.header("vary"), Some("HX-Request"));

    let fragment = client.htmx_get("/grocery?text=lime").await;
    assert_eq!(fragment.components("banner"), 0);
    assert_eq!(fragment.header("vary"), Some("HX-Request"));
}

#[tokio::test]
async fn test_history_restore_gets_the_full_page() {
    let mut client = TestClient::new();
    client.get("/grocery").await;

    let restored = client.htmx_history_restore("/grocery?text=lime").await;
    assert_eq!(restored.status, StatusCode::OK);
    assert!(restored.body.contains("<title>"));
    for component in ["banner", "store-nav", "carousel", "product-grid", "cart-popup"] {
        assert_eq!(restored.components(component), 1, "{component} should appear once");
    }
    assert_eq!(restored.header("vary"), Some("HX-Request"));
}

// =============================================================================
// Device Layout
// =============================================================================

#[tokio::test]
async fn test_mobile_block_visible_only_on_mobile() {
    let mut desktop = TestClient::new();
    let body = desktop.get("/grocery").await.body;
    assert!(body.contains("data-component=\"mobile-block\" hidden"));
    assert!(body.contains("data-per-view=\"3\""));

    let mut mobile = TestClient::new().with_user_agent(MOBILE_UA);
    let body = mobile.get("/grocery").await.body;
    assert!(!body.contains("data-component=\"mobile-block\" hidden"));
    assert!(body.contains("data-per-view=\"1\""));
    assert!(body.contains("--columns: 2"));
}

#[tokio::test]
async fn test_mobile_block_is_collapsible() {
    let mut mobile = TestClient::new().with_user_agent(MOBILE_UA);
    let body = mobile.get("/grocery").await.body;
    assert!(body.contains("<details class=\"mobile-block__menu\">"));
    assert!(body.contains("class=\"mobile-block__toggle\""));
    assert!(!body.contains("hx-swap-oob"));
}

#[tokio::test]
async fn test_category_change_refreshes_mobile_sidebar() {
    let mut mobile = TestClient::new().with_user_agent(MOBILE_UA);
    mobile.get("/grocery").await;

    let fragment = mobile.htmx_get("/grocery?category=fruits").await;
    assert_eq!(fragment.components("mobile-block"), 1);
    assert!(fragment.body.contains("hx-swap-oob=\"true\""));
    // Desktop aside and mobile block both mark the selection.
    assert_eq!(fragment.components("sidebar"), 2);
    assert_eq!(fragment.body.matches("\"depth-1 active").count(), 2);
}

// =============================================================================
// Product Grid
// =============================================================================

#[tokio::test]
async fn test_grid_paginates_with_load_more() {
    let mut client = TestClient::new();
    let page = client.get("/grocery").await;
    assert_eq!(page.body.matches("class=\"product-card\"").count(), 20);
    assert!(page.body.contains("hx-get=\"/grocery/products?offset=20\""));

    let more = client.htmx_get("/grocery/products?offset=20").await;
    assert_eq!(more.status, StatusCode::OK);
    assert_eq!(more.body.matches("class=\"product-card\"").count(), 4);
    assert_eq!(more.components("load-more"), 0);
}

#[tokio::test]
async fn test_grid_filters_by_text_and_category() {
    let mut client = TestClient::new();
    let body = client.get("/grocery?text=lime").await.body;
    assert_eq!(body.matches("class=\"product-card\"").count(), 2);

    let body = client.get("/grocery?category=dairy").await.body;
    assert!(body.matches("class=\"product-card\"").count() > 0);
    assert!(!body.contains(">Lime<"));
}

#[tokio::test]
async fn test_products_fragment_for_unknown_page_type_is_empty() {
    let mut client = TestClient::new();
    let response = client.htmx_get("/nonexistent/products?offset=20").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.is_empty());
}

// =============================================================================
// Scroll Realignment
// =============================================================================

fn scrolls(body: &str) -> bool {
    body.contains("data-scroll-now data-scroll-offset=\"-110\"")
}

#[tokio::test]
async fn test_mount_without_filters_does_not_scroll() {
    let mut client = TestClient::new();
    assert!(!scrolls(&client.get("/grocery").await.body));
}

#[tokio::test]
async fn test_mount_with_filters_scrolls() {
    let mut client = TestClient::new();
    let body = client.get("/grocery?category=fruits").await.body;
    assert!(scrolls(&body));
    // Anchor precedes the script that acts on it.
    assert!(body.find("id=\"products-anchor\"").unwrap() < body.find("scroll-realign.js").unwrap());
}

#[tokio::test]
async fn test_scroll_fires_once_per_distinct_change() {
    let mut client = TestClient::new();
    client.get("/grocery").await;

    let first = client.htmx_get("/grocery?text=lime").await;
    assert_eq!(first.components("banner"), 0, "HTMX gets the main content only");
    assert!(scrolls(&first.body));

    assert!(!scrolls(&client.htmx_get("/grocery?text=lime").await.body));
    assert!(scrolls(&client.htmx_get("/grocery?text=lime&category=fruits").await.body));
    assert!(!scrolls(&client.htmx_get("/grocery?text=lime&category=fruits").await.body));
}

#[tokio::test]
async fn test_full_reload_remounts_the_effect() {
    let mut client = TestClient::new();
    assert!(scrolls(&client.get("/grocery?text=lime").await.body));
    assert!(scrolls(&client.get("/grocery?text=lime").await.body));
}
