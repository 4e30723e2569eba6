//! In-process cart store.
//!
//! Carts are keyed by a [`CartToken`] kept in the visitor's session and held
//! in a `moka` cache that evicts carts left untouched for the configured TTL.
//! Views only read [`Cart`] snapshots; every change goes through one of the
//! mutation intents below, each applied atomically per cart.

use std::time::Duration;

use bazaar_core::{Cart, CartItem, CartToken, Coupon, CurrencyCode, ProductId};
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use tracing::instrument;

/// Upper bound on concurrently held carts.
const MAX_CARTS: u64 = 100_000;

/// Shared cart store. Cloning is cheap and clones share the same carts.
#[derive(Clone)]
pub struct CartStore {
    carts: Cache<CartToken, Cart>,
    currency: CurrencyCode,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("carts", &self.carts.entry_count())
            .field("currency", &self.currency)
            .finish()
    }
}

impl CartStore {
    /// Create a store whose carts are priced in `currency` and expire after
    /// `ttl` without access.
    #[must_use]
    pub fn new(currency: CurrencyCode, ttl: Duration) -> Self {
        let carts = Cache::builder()
            .max_capacity(MAX_CARTS)
            .time_to_idle(ttl)
            .build();
        Self { carts, currency }
    }

    /// Snapshot of a cart. Unknown tokens yield an empty cart.
    pub async fn get(&self, token: CartToken) -> Cart {
        self.carts
            .get(&token)
            .await
            .unwrap_or_else(|| Cart::new(self.currency))
    }

    /// Add `quantity` units of `item`.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub async fn add_item(&self, token: CartToken, item: &CartItem, quantity: u32) -> Cart {
        self.update(token, |cart| cart.add_item(item, quantity))
            .await
    }

    /// Remove one unit of a product.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, token: CartToken, id: ProductId) -> Cart {
        self.update(token, |cart| cart.remove_item(id, 1)).await
    }

    /// Remove a product line entirely.
    #[instrument(skip(self))]
    pub async fn remove_item_from_cart(&self, token: CartToken, id: ProductId) -> Cart {
        self.update(token, |cart| cart.remove_item_from_cart(id))
            .await
    }

    /// Attach a coupon to the cart.
    #[instrument(skip(self, coupon), fields(code = %coupon.code))]
    pub async fn apply_coupon(&self, token: CartToken, coupon: Coupon) -> Cart {
        self.update(token, |cart| cart.apply_coupon(coupon)).await
    }

    /// Read-modify-write a single cart.
    async fn update<F>(&self, token: CartToken, mutate: F) -> Cart
    where
        F: FnOnce(&mut Cart),
    {
        let currency = self.currency;
        let result = self
            .carts
            .entry(token)
            .and_compute_with(|entry| {
                let mut cart = entry.map_or_else(|| Cart::new(currency), |e| e.into_value());
                mutate(&mut cart);
                std::future::ready(Op::Put(cart))
            })
            .await;

        match result {
            CompResult::Inserted(entry)
            | CompResult::ReplacedWith(entry)
            | CompResult::Unchanged(entry) => entry.into_value(),
            CompResult::Removed(_) | CompResult::StillNone(_) => Cart::new(currency),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::CouponCode;
    use rust_decimal::Decimal;

    use super::*;

    fn store() -> CartStore {
        CartStore::new(CurrencyCode::USD, Duration::from_secs(60))
    }

    fn item(id: i32, price: i64) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            unit: None,
            image: None,
            price: Decimal::new(price, 2),
            sale_price: None,
            quantity: 1,
        }
    }

    #[tokio::test]
    async fn test_unknown_token_is_empty_cart() {
        let cart = store().get(CartToken::generate()).await;
        assert!(cart.is_empty());
        assert_eq!(cart.currency_code, CurrencyCode::USD);
    }

    #[tokio::test]
    async fn test_intents_update_the_stored_cart() {
        let store = store();
        let token = CartToken::generate();

        store.add_item(token, &item(1, 250), 2).await;
        store.add_item(token, &item(2, 100), 1).await;
        assert_eq!(store.get(token).await.cart_items_count(), 3);

        let cart = store.remove_item(token, ProductId::new(1)).await;
        assert_eq!(cart.get_item(ProductId::new(1)).unwrap().quantity, 1);

        let cart = store.remove_item_from_cart(token, ProductId::new(2)).await;
        assert_eq!(cart.items().len(), 1);
        assert_eq!(store.get(token).await, cart);
    }

    #[tokio::test]
    async fn test_carts_are_isolated_per_token() {
        let store = store();
        let a = CartToken::generate();
        let b = CartToken::generate();
        store.add_item(a, &item(1, 100), 1).await;
        assert!(store.get(b).await.is_empty());
    }

    #[tokio::test]
    async fn test_apply_coupon_discounts_total() {
        let store = store();
        let token = CartToken::generate();
        store.add_item(token, &item(1, 1000), 1).await;
        let coupon = Coupon::new(CouponCode::parse("WELCOME10").unwrap(), 10);
        let cart = store.apply_coupon(token, coupon).await;
        assert_eq!(cart.calculate_price().display(), "$9.00");
        assert!(store.get(token).await.coupon().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let store = store();
        let token = CartToken::generate();
        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.add_item(token, &item(1, 100), 1).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(store.get(token).await.cart_items_count(), 20);
    }
}
