//! Products

use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};

pub mod specs;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// A catalog product as resolved by the storefront.
#[derive(Debug, Clone)]
pub struct Product {
    /// Product name
    pub name: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// Primary image reference
    pub image: String,

    /// Category label
    pub category: String,
}

/// Product catalog keyed by [`ProductKey`].
#[derive(Debug, Default)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product and return its key.
    pub fn insert(&mut self, product: Product) -> ProductKey {
        self.products.insert(product)
    }

    /// Look up a product by key.
    #[must_use]
    pub fn get(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Iterate over the products in the catalog.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product)> {
        self.products.iter()
    }

    /// Get the number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
