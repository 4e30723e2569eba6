//! Product grid view model.

use bazaar_core::{CurrencyCode, DeviceType, Price};

use crate::catalog::{Product, ProductPage};
use crate::site::Messages;
use crate::views::scroll::SearchParams;

/// A product card in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: i32,
    pub title: String,
    pub unit: String,
    pub image: String,
    /// Regular price, formatted.
    pub price: String,
    /// Sale price, formatted, when the product is discounted.
    pub sale_price: Option<String>,
    /// e.g. "25%".
    pub discount_badge: Option<String>,
}

impl ProductCardView {
    fn new(product: &Product, currency: CurrencyCode) -> Self {
        Self {
            id: product.id.as_i32(),
            title: product.title.clone(),
            unit: product.unit.clone(),
            image: product.image.clone(),
            price: Price::new(product.price, currency).rounded().display(),
            sale_price: product
                .sale_price
                .map(|sale| Price::new(sale, currency).rounded().display()),
            discount_badge: product.discount_in_percent().map(|pct| format!("{pct}%")),
        }
    }
}

/// One page of the product grid plus its "load more" continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductGridView {
    pub page_type: String,
    pub columns: usize,
    pub cards: Vec<ProductCardView>,
    /// Fragment URL for the next page, if any.
    pub load_more_href: Option<String>,
    pub empty_message: String,
    pub load_more_label: String,
    pub add_to_cart_label: String,
}

impl ProductGridView {
    #[must_use]
    pub fn build(
        page_type: &str,
        device: DeviceType,
        params: &SearchParams,
        page: &ProductPage,
        currency: CurrencyCode,
        messages: &Messages,
    ) -> Self {
        let empty_message = if params.is_active() {
            messages.get_or("noProductsInCategory", "No products match your search")
        } else {
            messages.get_or("noProductFound", "No products found")
        };

        Self {
            page_type: page_type.to_string(),
            columns: device.product_grid_columns(),
            cards: page
                .products
                .iter()
                .map(|product| ProductCardView::new(product, currency))
                .collect(),
            load_more_href: page
                .next_offset
                .map(|offset| load_more_href(page_type, params, offset)),
            empty_message: empty_message.to_string(),
            load_more_label: messages.get_or("loadMoreButton", "Load More").to_string(),
            add_to_cart_label: messages.get_or("addToCart", "Add to cart").to_string(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// URL of the grid fragment starting at `offset`, preserving filters.
fn load_more_href(page_type: &str, params: &SearchParams, offset: usize) -> String {
    let mut href = format!("/{page_type}/products?offset={offset}");
    if let Some(text) = &params.text {
        href.push_str("&text=");
        href.push_str(&urlencoding::encode(text));
    }
    if let Some(category) = &params.category {
        href.push_str("&category=");
        href.push_str(&urlencoding::encode(category));
    }
    href
}

#[cfg(test)]
mod tests {
    use bazaar_core::ProductId;
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            page_type: "grocery".to_string(),
            title: format!("Item {id}"),
            slug: format!("item-{id}"),
            unit: "1 lb".to_string(),
            image: String::new(),
            price: Decimal::new(200, 2),
            sale_price: Some(Decimal::new(150, 2)),
            categories: Vec::new(),
            description: String::new(),
        }
    }

    fn page(next_offset: Option<usize>) -> ProductPage {
        ProductPage {
            products: vec![product(1), product(2)],
            total: 2,
            next_offset,
        }
    }

    #[test]
    fn test_cards_show_sale_and_badge() {
        let grid = ProductGridView::build(
            "grocery",
            DeviceType::Desktop,
            &SearchParams::default(),
            &page(None),
            CurrencyCode::USD,
            &Messages::default(),
        );
        assert_eq!(grid.cards.len(), 2);
        assert_eq!(grid.cards[0].price, "$2.00");
        assert_eq!(grid.cards[0].sale_price.as_deref(), Some("$1.50"));
        assert_eq!(grid.cards[0].discount_badge.as_deref(), Some("25%"));
        assert_eq!(grid.columns, 4);
        assert!(grid.load_more_href.is_none());
    }

    #[test]
    fn test_load_more_preserves_filters() {
        let params = SearchParams::new(Some("green apple"), Some("fruits"));
        let grid = ProductGridView::build(
            "grocery",
            DeviceType::Mobile,
            &params,
            &page(Some(20)),
            CurrencyCode::USD,
            &Messages::default(),
        );
        assert_eq!(
            grid.load_more_href.as_deref(),
            Some("/grocery/products?offset=20&text=green%20apple&category=fruits")
        );
        assert_eq!(grid.columns, 2);
    }

    #[test]
    fn test_empty_message_depends_on_filters() {
        let empty = ProductPage {
            products: Vec::new(),
            total: 0,
            next_offset: None,
        };
        let unfiltered = ProductGridView::build(
            "bags",
            DeviceType::Desktop,
            &SearchParams::default(),
            &empty,
            CurrencyCode::USD,
            &Messages::default(),
        );
        assert!(unfiltered.is_empty());
        assert_eq!(unfiltered.empty_message, "No products found");

        let filtered = ProductGridView::build(
            "bags",
            DeviceType::Desktop,
            &SearchParams::new(Some("zzz"), None),
            &empty,
            CurrencyCode::USD,
            &Messages::default(),
        );
        assert_eq!(filtered.empty_message, "No products match your search");
    }
}
