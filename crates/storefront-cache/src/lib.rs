//! Type-safe key-value persistence for the storefront.
//!
//! Provides a small store seam ([`KeyValueStore`]) with in-memory and
//! file-backed implementations, a typed [`Cache`] on top with automatic JSON
//! serialization, and [`CollectionStore`] for the cart and wishlist.
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront_cache::{CollectionStore, FileStore};
//!
//! let store = CollectionStore::new(FileStore::open(".storefront/store.json")?);
//! let cart = store.load_cart()?;
//! println!("{} items", cart.item_count());
//! # Ok::<(), storefront_cache::CacheError>(())
//! ```

mod collections;
mod error;
mod kv;

pub use collections::{CollectionStore, CART_KEY, WISHLIST_KEY};
pub use error::CacheError;
pub use kv::{Cache, FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, CollectionStore, FileStore, KeyValueStore, MemoryStore};
}
