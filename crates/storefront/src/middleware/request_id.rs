//! Request ID middleware for request tracing and correlation.
//!
//! Every response carries an `x-request-id` header. An upstream value is
//! reused when it looks sane; otherwise a UUID v4 is generated. The ID is
//! recorded on the current tracing span and tagged on the Sentry scope.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request ID we are willing to echo back.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = upstream_request_id(request.headers().get(REQUEST_ID_HEADER))
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Span::current().record("request_id", &request_id);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Accept an upstream ID only if it is short, printable ASCII without spaces.
fn upstream_request_id(value: Option<&HeaderValue>) -> Option<String> {
    let id = value?.to_str().ok()?.trim();
    let acceptable = !id.is_empty()
        && id.len() <= MAX_UPSTREAM_ID_LEN
        && id.bytes().all(|b| b.is_ascii_graphic());
    acceptable.then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_id_is_reused() {
        let value = HeaderValue::from_static("cf-1234-abcd");
        assert_eq!(
            upstream_request_id(Some(&value)).as_deref(),
            Some("cf-1234-abcd")
        );
    }

    #[test]
    fn test_missing_or_unusable_upstream_id_is_ignored() {
        assert!(upstream_request_id(None).is_none());
        assert!(upstream_request_id(Some(&HeaderValue::from_static("   "))).is_none());
        assert!(upstream_request_id(Some(&HeaderValue::from_static("has space"))).is_none());
        let long = HeaderValue::from_str(&"a".repeat(MAX_UPSTREAM_ID_LEN + 1)).ok();
        assert!(upstream_request_id(long.as_ref()).is_none());
    }
}
