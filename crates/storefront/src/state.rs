//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::catalog::LazyCatalog;
use crate::config::StorefrontConfig;
use crate::site::{ContentError, SiteContent};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Site content is immutable;
/// the catalog loads itself on first use and the cart store is internally
/// synchronized.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    site: SiteContent,
    catalog: LazyCatalog,
    carts: CartStore,
}

impl AppState {
    /// Create application state, loading site content from the configured
    /// content directory. The product catalog is not read until first use.
    ///
    /// # Errors
    ///
    /// Returns an error if site content cannot be loaded.
    pub fn new(config: StorefrontConfig) -> Result<Self, ContentError> {
        let site = SiteContent::load(&config.content_dir)?;
        let catalog = LazyCatalog::new(config.content_dir.join("products.json"));
        Ok(Self::from_parts(config, site, catalog))
    }

    /// Assemble state from already-built parts.
    #[must_use]
    pub fn from_parts(config: StorefrontConfig, site: SiteContent, catalog: LazyCatalog) -> Self {
        let carts = CartStore::new(config.currency, config.cart_ttl);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                site,
                catalog,
                carts,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn site(&self) -> &SiteContent {
        &self.inner.site
    }

    #[must_use]
    pub fn catalog(&self) -> &LazyCatalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }
}
