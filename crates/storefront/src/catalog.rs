//! Product catalog backing the product grid.
//!
//! The catalog is the heaviest piece of site content, so it is not read at
//! startup. [`LazyCatalog`] loads `products.json` on the first render that
//! needs it and caches the result for the life of the process.

use std::path::PathBuf;
use std::sync::Arc;

use bazaar_core::{CartItem, ProductId};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::site::ContentError;

/// Number of products fetched per grid page.
pub const FETCH_LIMIT: usize = 20;

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub page_type: String,
    pub title: String,
    pub slug: String,
    pub unit: String,
    pub image: String,
    pub price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    /// Category slugs, including ancestors.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Percentage saved by the sale price, rounded down.
    #[must_use]
    pub fn discount_in_percent(&self) -> Option<u32> {
        let sale = self.sale_price?;
        if self.price <= Decimal::ZERO || sale >= self.price {
            return None;
        }
        let pct = (self.price - sale) * Decimal::ONE_HUNDRED / self.price;
        pct.trunc().to_u32()
    }

    fn matches(&self, query: &ProductQuery<'_>) -> bool {
        if self.page_type != query.page_type {
            return false;
        }
        if query
            .category
            .is_some_and(|category| !self.categories.iter().any(|c| c == category))
        {
            return false;
        }
        if let Some(text) = query.text {
            let needle = text.to_lowercase();
            if !self.title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.title.clone(),
            unit: Some(product.unit.clone()),
            image: Some(product.image.clone()),
            price: product.price,
            sale_price: product.sale_price,
            quantity: 1,
        }
    }
}

/// Filter and pagination parameters for a grid fetch.
#[derive(Debug, Clone, Copy)]
pub struct ProductQuery<'a> {
    pub page_type: &'a str,
    /// Case-insensitive title search. Blank strings are ignored.
    pub text: Option<&'a str>,
    /// Category slug.
    pub category: Option<&'a str>,
    pub offset: usize,
    pub limit: usize,
}

impl<'a> ProductQuery<'a> {
    /// First page of a page type's products with the default limit.
    #[must_use]
    pub const fn new(page_type: &'a str) -> Self {
        Self {
            page_type,
            text: None,
            category: None,
            offset: 0,
            limit: FETCH_LIMIT,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: Option<&'a str>) -> Self {
        self.text = text.map(str::trim).filter(|t| !t.is_empty());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<&'a str>) -> Self {
        self.category = category.map(str::trim).filter(|c| !c.is_empty());
        self
    }

    #[must_use]
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// One page of grid results.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Number of products matching the filters, across all pages.
    pub total: usize,
    /// Offset of the next page, if there is one.
    pub next_offset: Option<usize>,
}

/// In-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Run a grid query. Results keep catalog order.
    #[must_use]
    pub fn query(&self, query: &ProductQuery<'_>) -> ProductPage {
        let matching: Vec<&Product> = self.products.iter().filter(|p| p.matches(query)).collect();
        let total = matching.len();
        let limit = query.limit.max(1);
        let products: Vec<Product> = matching
            .into_iter()
            .skip(query.offset)
            .take(limit)
            .cloned()
            .collect();
        let end = query.offset.saturating_add(products.len());
        let next_offset = (end < total).then_some(end);

        ProductPage {
            products,
            total,
            next_offset,
        }
    }
}

/// Product catalog loaded from disk on first use.
#[derive(Debug, Clone)]
pub struct LazyCatalog {
    path: PathBuf,
    cell: Arc<OnceCell<ProductCatalog>>,
}

impl LazyCatalog {
    /// Catalog that will be read from `path` when first needed.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: Arc::new(OnceCell::new()),
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Get the catalog, loading it if this is the first call.
    ///
    /// Concurrent first calls share a single load. A failed load is not
    /// cached; the next call retries.
    ///
    /// # Errors
    ///
    /// Returns an error if the products file cannot be read or parsed.
    pub async fn get(&self) -> Result<&ProductCatalog, ContentError> {
        self.cell
            .get_or_try_init(|| async {
                let raw = tokio::fs::read_to_string(&self.path).await.map_err(|source| {
                    ContentError::Io {
                        path: self.path.display().to_string(),
                        source,
                    }
                })?;
                let products: Vec<Product> =
                    serde_json::from_str(&raw).map_err(|source| ContentError::Parse {
                        path: self.path.display().to_string(),
                        source,
                    })?;
                tracing::info!(products = products.len(), "Product catalog loaded");
                Ok(ProductCatalog::new(products))
            })
            .await
    }
}
