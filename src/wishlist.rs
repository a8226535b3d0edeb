//! Wishlist

use rustc_hash::FxHashSet;

use crate::products::ProductKey;

/// The set of products a shopper has saved for later.
#[derive(Debug, Default, Clone)]
pub struct Wishlist {
    products: FxHashSet<ProductKey>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a product. Returns `true` when the product is now present.
    pub fn toggle(&mut self, product: ProductKey) -> bool {
        if self.products.remove(&product) {
            false
        } else {
            self.products.insert(product);

            true
        }
    }

    /// Remove a product. No-op if absent.
    pub fn remove(&mut self, product: ProductKey) {
        self.products.remove(&product);
    }

    /// Whether the product is on the wishlist.
    #[must_use]
    pub fn contains(&self, product: ProductKey) -> bool {
        self.products.contains(&product)
    }

    /// Iterate over the wishlisted products.
    pub fn iter(&self) -> impl Iterator<Item = ProductKey> + '_ {
        self.products.iter().copied()
    }

    /// Get the number of wishlisted products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
