//! Integration tests for the Bazaar storefront.
//!
//! Tests drive the full router (middleware, sessions, templates) in process
//! with `tower::ServiceExt::oneshot`; no server or network is involved.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! [`TestClient`] keeps the session cookie between requests, so a sequence
//! of calls behaves like one visitor's browser.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::state::AppState;
use tower::ServiceExt;

/// User agent of a phone browser.
pub const MOBILE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
    AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

/// User agent of a desktop browser.
pub const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// A response with its body collected as text.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Number of elements tagged `data-component="{name}"`.
    #[must_use]
    pub fn components(&self, name: &str) -> usize {
        self.body
            .matches(&format!("data-component=\"{name}\""))
            .count()
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// One visitor talking to a fresh storefront.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
    user_agent: &'static str,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// Storefront backed by the bundled site content.
    #[must_use]
    pub fn new() -> Self {
        let content_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront/content");
        let state = AppState::new(StorefrontConfig::local(content_dir)).unwrap();
        Self {
            app: bazaar_storefront::app(state),
            cookie: None,
            user_agent: DESKTOP_UA,
        }
    }

    #[must_use]
    pub const fn with_user_agent(mut self, user_agent: &'static str) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Full page load.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Request issued by HTMX.
    pub async fn htmx_get(&mut self, uri: &str) -> TestResponse {
        let request = self
            .request("GET", uri)
            .header("HX-Request", "true")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// HTMX history restore after a cache miss on back navigation.
    pub async fn htmx_history_restore(&mut self, uri: &str) -> TestResponse {
        let request = self
            .request("GET", uri)
            .header("HX-Request", "true")
            .header("HX-History-Restore-Request", "true")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Form POST issued by HTMX.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header("HX-Request", "true")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::USER_AGENT, self.user_agent);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
