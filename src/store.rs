//! Store
//!
//! The shared shopper state for one browsing session: catalog, cart, wishlist
//! and the signed-in session, held in one explicit container that is injected
//! into the call graph. All mutation goes through the narrow operation set
//! here; there is no ambient global state.

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    cart::{Cart, CartEntry, CartError},
    checkout::{Checkout, CheckoutError, OrderConfirmation},
    notify::{Notification, Notifier},
    products::{Catalog, ProductKey},
    session::{IdentityProvider, Session},
    wishlist::Wishlist,
};

/// Errors raised by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The product key does not resolve in the catalog.
    #[error("product not found")]
    UnknownProduct(ProductKey),

    /// Errors bubbled up from the cart.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Session-scoped shopper state.
#[derive(Debug)]
pub struct Store {
    catalog: Catalog,
    cart: Cart,
    wishlist: Wishlist,
    session: Option<Session>,
}

impl Store {
    /// Create a store with an empty catalog.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self::with_catalog(Catalog::new(), currency)
    }

    /// Create a store around an existing catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog, currency: &'static Currency) -> Self {
        Store {
            catalog,
            cart: Cart::new(currency),
            wishlist: Wishlist::new(),
            session: None,
        }
    }

    /// The product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The product catalog, mutably. Used by the admin editor.
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// The shopper's cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The shopper's wishlist.
    #[must_use]
    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// The current shopper session, if signed in.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Resolve the current session from the identity provider.
    ///
    /// Returns whether a shopper is now signed in.
    pub fn sign_in(&mut self, provider: &dyn IdentityProvider) -> bool {
        self.session = provider.current_session();

        if let Some(session) = &self.session {
            tracing::info!(shopper = %session.shopper.name, "shopper signed in");
        }

        self.session.is_some()
    }

    /// Discard the current session.
    pub fn sign_out(&mut self) {
        self.session = None;
    }

    /// Add a catalog product to the cart and notify the shopper.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownProduct`] if the key does not resolve, or
    /// a cart error if the line cannot be added.
    #[tracing::instrument(name = "store.add_to_cart", skip(self, notifier))]
    pub fn add_to_cart<N: Notifier>(
        &mut self,
        product: ProductKey,
        notifier: &mut N,
    ) -> Result<(), StoreError> {
        let entry = CartEntry::from_catalog(&self.catalog, product)
            .ok_or(StoreError::UnknownProduct(product))?;

        let name = entry.name.clone();

        self.cart.add(entry)?;

        notifier.notify(Notification::success("Added to cart", name));

        Ok(())
    }

    /// Remove a product's line from the cart. No-op if absent.
    pub fn remove_from_cart(&mut self, product: ProductKey) {
        self.cart.remove(product);
    }

    /// Replace a line's quantity. Quantities below 1 are silently ignored.
    pub fn set_quantity(&mut self, product: ProductKey, quantity: u32) {
        self.cart.set_quantity(product, quantity);
    }

    /// Toggle a product on the wishlist and notify the shopper.
    ///
    /// Returns whether the product is now wishlisted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownProduct`] if the key does not resolve.
    pub fn toggle_wishlist<N: Notifier>(
        &mut self,
        product: ProductKey,
        notifier: &mut N,
    ) -> Result<bool, StoreError> {
        let name = self
            .catalog
            .get(product)
            .ok_or(StoreError::UnknownProduct(product))?
            .name
            .clone();

        let added = self.wishlist.toggle(product);

        if added {
            notifier.notify(Notification::info("Added to wishlist", name));
        } else {
            notifier.notify(Notification::info("Removed from wishlist", name));
        }

        Ok(added)
    }

    /// Begin checkout against the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
    pub fn begin_checkout(&self) -> Result<Checkout, CheckoutError> {
        Checkout::begin(&self.cart)
    }

    /// Place the order driven by the given sequencer.
    ///
    /// # Errors
    ///
    /// Propagates [`Checkout::place_order`] errors.
    pub fn place_order<N: Notifier>(
        &mut self,
        checkout: &mut Checkout,
        notifier: &mut N,
    ) -> Result<OrderConfirmation, CheckoutError> {
        checkout.place_order(&mut self.cart, notifier)
    }
}
