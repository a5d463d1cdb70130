//! Persisted cart and wishlist collections.

use crate::{cache_key, Cache, CacheError, KeyValueStore};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Mutex;
use storefront_core::cart::{Cart, Wishlist};

/// Store key for the cart collection.
pub const CART_KEY: &str = "cart";
/// Store key for the wishlist collection.
pub const WISHLIST_KEY: &str = "wishlist";

/// Loads and saves the cart and wishlist.
///
/// Mutations go through [`CollectionStore::mutate_cart`] and
/// [`CollectionStore::mutate_wishlist`], which hold a store-wide lock for the
/// whole load, reconcile, save cycle so concurrent callers in one process
/// never overwrite each other. A failed reconcile saves nothing.
#[derive(Debug)]
pub struct CollectionStore<S> {
    cache: Cache<S>,
    profile: Option<String>,
    lock: Mutex<()>,
}

impl<S: KeyValueStore> CollectionStore<S> {
    /// Collections under the plain `"cart"` / `"wishlist"` keys.
    pub fn new(store: S) -> Self {
        Self {
            cache: Cache::new(store),
            profile: None,
            lock: Mutex::new(()),
        }
    }

    /// Collections namespaced by profile, e.g. `"cart:alice"`.
    pub fn for_profile(store: S, profile: impl Into<String>) -> Self {
        Self {
            profile: Some(profile.into()),
            ..Self::new(store)
        }
    }

    pub fn cart_key(&self) -> String {
        self.key(CART_KEY)
    }

    pub fn wishlist_key(&self) -> String {
        self.key(WISHLIST_KEY)
    }

    fn key(&self, base: &str) -> String {
        match &self.profile {
            Some(profile) => cache_key!(base, profile),
            None => base.to_string(),
        }
    }

    /// Stored cart, or an empty one.
    pub fn load_cart(&self) -> Result<Cart, CacheError> {
        self.cache.get_or_default(&self.cart_key())
    }

    pub fn save_cart(&self, cart: &Cart) -> Result<(), CacheError> {
        self.cache.set(&self.cart_key(), cart)
    }

    /// Stored wishlist, or an empty one.
    pub fn load_wishlist(&self) -> Result<Wishlist, CacheError> {
        self.cache.get_or_default(&self.wishlist_key())
    }

    pub fn save_wishlist(&self, wishlist: &Wishlist) -> Result<(), CacheError> {
        self.cache.set(&self.wishlist_key(), wishlist)
    }

    /// Load the cart, apply `f`, and save the cart it returns.
    ///
    /// `f` returns the new cart plus any value the caller wants back. When
    /// `f` fails the stored cart is left untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use storefront_cache::{CacheError, CollectionStore, MemoryStore};
    /// use storefront_core::prelude::*;
    ///
    /// #[derive(Debug)]
    /// enum AppError {
    ///     Cache(CacheError),
    ///     Cart(CommerceError),
    /// }
    /// impl From<CacheError> for AppError {
    ///     fn from(e: CacheError) -> Self { AppError::Cache(e) }
    /// }
    ///
    /// let store = CollectionStore::new(MemoryStore::new());
    /// let lamp = Product::new(1, "lamp", "Lamp", Money::new(2500), "home");
    ///
    /// let clamped = store
    ///     .mutate_cart(|cart| {
    ///         let update = cart.add_to_cart(&lamp, 2, None).map_err(AppError::Cart)?;
    ///         Ok::<_, AppError>((update.cart, update.clamped))
    ///     })
    ///     .unwrap();
    /// assert!(clamped.is_none());
    /// assert_eq!(store.load_cart().unwrap().item_count(), 2);
    /// ```
    pub fn mutate_cart<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&Cart) -> Result<(Cart, R), E>,
        E: From<CacheError>,
    {
        self.mutate(&self.cart_key(), f)
    }

    /// Load the wishlist, apply `f`, and save the wishlist it returns.
    pub fn mutate_wishlist<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&Wishlist) -> Result<(Wishlist, R), E>,
        E: From<CacheError>,
    {
        self.mutate(&self.wishlist_key(), f)
    }

    fn mutate<T, R, E, F>(&self, key: &str, f: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&T) -> Result<(T, R), E>,
        E: From<CacheError>,
    {
        let _guard = self.lock.lock().map_err(CacheError::from)?;

        let current: T = self.cache.get_or_default(key)?;
        let (next, output) = f(&current)?;
        self.cache.set(key, &next)?;

        tracing::debug!(key, "collection saved");
        Ok(output)
    }

    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }
}
