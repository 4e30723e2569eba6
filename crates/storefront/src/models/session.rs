//! Session-related types and helpers.
//!
//! The session holds the visitor's cart token and view state that must
//! survive between renders: whether the coupon box is expanded and what the
//! scroll effect last observed on each category page.

use bazaar_core::CartToken;
use tower_sessions::Session;

use crate::views::scroll::ScrollEffect;

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart token.
    pub const CART_TOKEN: &str = "cart_token";

    /// Key for the cart popup's "have a code?" toggle.
    pub const COUPON_BOX_OPEN: &str = "coupon_box_open";

    /// Key prefix for per-page scroll effect state.
    pub const SCROLL_EFFECT_PREFIX: &str = "scroll_effect:";
}

type SessionResult<T> = Result<T, tower_sessions::session::Error>;

/// Get the visitor's cart token, creating and storing one if needed.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn cart_token(session: &Session) -> SessionResult<CartToken> {
    if let Some(token) = session.get::<CartToken>(keys::CART_TOKEN).await? {
        return Ok(token);
    }
    let token = CartToken::generate();
    session.insert(keys::CART_TOKEN, token).await?;
    tracing::debug!(cart_token = %token, "Issued cart token");
    Ok(token)
}

/// Whether the coupon entry box is expanded. Defaults to collapsed.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn coupon_box_open(session: &Session) -> SessionResult<bool> {
    Ok(session
        .get::<bool>(keys::COUPON_BOX_OPEN)
        .await?
        .unwrap_or(false))
}

/// Flip the coupon box toggle and return the new value.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn toggle_coupon_box(session: &Session) -> SessionResult<bool> {
    let open = !coupon_box_open(session).await?;
    session.insert(keys::COUPON_BOX_OPEN, open).await?;
    Ok(open)
}

fn scroll_effect_key(page_type: &str) -> String {
    format!("{}{page_type}", keys::SCROLL_EFFECT_PREFIX)
}

/// Scroll effect state for a mounted category page.
///
/// Pages never rendered in this session get a fresh, unmounted effect.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_scroll_effect(session: &Session, page_type: &str) -> SessionResult<ScrollEffect> {
    Ok(session
        .get::<ScrollEffect>(&scroll_effect_key(page_type))
        .await?
        .unwrap_or_default())
}

/// Persist scroll effect state for a category page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_scroll_effect(
    session: &Session,
    page_type: &str,
    effect: &ScrollEffect,
) -> SessionResult<()> {
    session.insert(&scroll_effect_key(page_type), effect).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;
    use crate::views::scroll::SearchParams;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_cart_token_is_stable() {
        let session = session();
        let first = cart_token(&session).await.unwrap();
        let second = cart_token(&session).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_coupon_box_toggles() {
        let session = session();
        assert!(!coupon_box_open(&session).await.unwrap());
        assert!(toggle_coupon_box(&session).await.unwrap());
        assert!(coupon_box_open(&session).await.unwrap());
        assert!(!toggle_coupon_box(&session).await.unwrap());
        assert!(!coupon_box_open(&session).await.unwrap());
    }

    #[tokio::test]
    async fn test_scroll_effect_is_scoped_per_page() {
        let session = session();
        let mut effect = load_scroll_effect(&session, "grocery").await.unwrap();
        let params = SearchParams::new(Some("apple"), None);
        assert!(effect.observe(&params));
        save_scroll_effect(&session, "grocery", &effect).await.unwrap();

        let mut reloaded = load_scroll_effect(&session, "grocery").await.unwrap();
        assert!(!reloaded.observe(&params));

        let mut other = load_scroll_effect(&session, "bakery").await.unwrap();
        assert!(other.observe(&params));
    }
}
