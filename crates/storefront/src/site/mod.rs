//! Static site settings loaded once at startup.
//!
//! Everything here is read from JSON files in the content directory and is
//! immutable afterwards:
//!
//! ```text
//! content/
//!   pages.json        page type -> PageDescriptor
//!   offers.json       carousel offers
//!   navigation.json   category menu items
//!   categories.json   page type -> sidebar category tree
//!   messages.json     message key -> default text
//!   coupons.json      redeemable coupon codes
//! ```
//!
//! The product catalog is not part of this module; it is loaded lazily on
//! first render (see [`crate::catalog`]).

pub mod coupons;
pub mod messages;
pub mod navigation;
pub mod offers;
pub mod pages;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use coupons::{CouponBook, CouponDefinition};
pub use messages::Messages;
pub use navigation::{Category, NavItem};
pub use offers::Offer;
pub use pages::{PageDescriptor, PageRegistry};

/// Errors raised while loading site content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid content: {0}")]
    Invalid(String),
}

/// All static site settings.
///
/// Cheaply cloneable; the data sits behind a single `Arc`.
#[derive(Debug, Clone)]
pub struct SiteContent {
    inner: Arc<SiteContentInner>,
}

#[derive(Debug)]
struct SiteContentInner {
    pages: PageRegistry,
    offers: Vec<Offer>,
    navigation: Vec<NavItem>,
    categories: HashMap<String, Vec<Category>>,
    messages: Messages,
    coupons: CouponBook,
}

impl SiteContent {
    /// Load all site settings from `content_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if any file is missing, is not valid JSON, or fails
    /// validation (e.g. a coupon with a discount above 100%).
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let pages: PageRegistry = read_json(&content_dir.join("pages.json"))?;
        let offers: Vec<Offer> = read_json(&content_dir.join("offers.json"))?;
        let navigation: Vec<NavItem> = read_json(&content_dir.join("navigation.json"))?;
        let categories: HashMap<String, Vec<Category>> =
            read_json(&content_dir.join("categories.json"))?;
        let messages: Messages = read_json(&content_dir.join("messages.json"))?;
        let coupons = CouponBook::new(read_json(&content_dir.join("coupons.json"))?)?;

        tracing::info!(
            pages = pages.len(),
            offers = offers.len(),
            nav_items = navigation.len(),
            coupons = coupons.len(),
            "Site content loaded"
        );

        Ok(Self::from_parts(
            pages, offers, navigation, categories, messages, coupons,
        ))
    }

    /// Assemble site content from already-parsed parts.
    #[must_use]
    pub fn from_parts(
        pages: PageRegistry,
        offers: Vec<Offer>,
        navigation: Vec<NavItem>,
        categories: HashMap<String, Vec<Category>>,
        messages: Messages,
        coupons: CouponBook,
    ) -> Self {
        Self {
            inner: Arc::new(SiteContentInner {
                pages,
                offers,
                navigation,
                categories,
                messages,
                coupons,
            }),
        }
    }

    #[must_use]
    pub fn pages(&self) -> &PageRegistry {
        &self.inner.pages
    }

    #[must_use]
    pub fn offers(&self) -> &[Offer] {
        &self.inner.offers
    }

    #[must_use]
    pub fn navigation(&self) -> &[NavItem] {
        &self.inner.navigation
    }

    /// Sidebar categories for a page type. Unknown page types have none.
    #[must_use]
    pub fn categories(&self, page_type: &str) -> &[Category] {
        self.inner
            .categories
            .get(page_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.inner.messages
    }

    #[must_use]
    pub fn coupons(&self) -> &CouponBook {
        &self.inner.coupons
    }
}

/// Read and deserialize a JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ContentError::Parse {
        path: path.display().to_string(),
        source,
    })
}
