//! Device classification extractor.
//!
//! Layout decisions (carousel density, grid columns, the mobile navigation
//! block) depend on the visitor's device. The classification is derived from
//! the `User-Agent` header on every request; nothing is stored.

use axum::{
    extract::FromRequestParts,
    http::{header::USER_AGENT, request::Parts},
};
use bazaar_core::DeviceType;

/// The device type of the current request.
///
/// # Example
///
/// ```ignore
/// async fn handler(Device(device): Device) -> impl IntoResponse {
///     format!("rendering for {}", device.as_str())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Device(pub DeviceType);

impl<S> FromRequestParts<S> for Device
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|h| h.to_str().ok());
        Ok(Self(DeviceType::from_user_agent(user_agent)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> DeviceType {
        let (mut parts, ()) = request.into_parts();
        Device::from_request_parts(&mut parts, &()).await.unwrap().0
    }

    #[tokio::test]
    async fn test_reads_user_agent_header() {
        let request = Request::builder()
            .header(USER_AGENT, "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0) Mobile/15E148")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, DeviceType::Mobile);
    }

    #[tokio::test]
    async fn test_missing_header_is_desktop() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await, DeviceType::Desktop);
    }
}
