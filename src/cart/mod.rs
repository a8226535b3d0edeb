//! Cart

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::products::{Catalog, Product, ProductKey};

/// Errors related to cart mutation or totals.
#[derive(Debug, Error)]
pub enum CartError {
    /// A line's currency differs from the cart currency (line currency, cart currency).
    #[error("Line has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// A line total or cart subtotal overflowed the minor-unit range.
    #[error("amount arithmetic overflowed")]
    AmountOverflow,
}

/// Descriptive fields for a cart line, resolved from the catalog at add time.
#[derive(Debug, Clone)]
pub struct CartEntry {
    /// Key of the product being added
    pub product: ProductKey,

    /// Display name
    pub name: String,

    /// Unit price
    pub unit_price: Money<'static, Currency>,

    /// Image reference
    pub image: String,

    /// Category label
    pub category: String,
}

impl CartEntry {
    /// Resolve an entry from a catalog product.
    #[must_use]
    pub fn from_product(key: ProductKey, product: &Product) -> Self {
        Self {
            product: key,
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
        }
    }

    /// Resolve an entry by key from the catalog.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog, key: ProductKey) -> Option<Self> {
        catalog
            .get(key)
            .map(|product| Self::from_product(key, product))
    }
}

/// One line of the cart: an entry plus the quantity being purchased.
#[derive(Debug, Clone)]
pub struct CartLine {
    entry: CartEntry,
    quantity: u32,
}

impl CartLine {
    /// Key of the product on this line.
    #[must_use]
    pub fn product(&self) -> ProductKey {
        self.entry.product
    }

    /// Display name of the line.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Unit price of the line.
    #[must_use]
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.entry.unit_price
    }

    /// Image reference of the line.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.entry.image
    }

    /// Category label of the line.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.entry.category
    }

    /// Quantity being purchased. Always at least 1.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountOverflow`] if the product exceeds the
    /// minor-unit range.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, CartError> {
        let minor = self
            .entry
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(CartError::AmountOverflow)?;

        Ok(Money::from_minor(minor, self.entry.unit_price.currency()))
    }
}

/// The set of lines a shopper intends to buy, scoped to one session.
///
/// Each distinct product appears on at most one line. Adding a product that is
/// already present increments its quantity by one and leaves the stored
/// descriptive fields untouched.
#[derive(Debug)]
pub struct Cart {
    lines: SmallVec<[CartLine; 10]>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: SmallVec::new(),
            currency,
        }
    }

    /// Add an entry to the cart.
    ///
    /// If a line for the same product exists, its quantity is incremented by
    /// exactly one and the incoming descriptive fields are ignored. Otherwise
    /// a new line with quantity 1 is appended.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the entry is priced in a
    /// currency other than the cart's.
    pub fn add(&mut self, entry: CartEntry) -> Result<(), CartError> {
        let entry_currency = entry.unit_price.currency();

        if entry_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                entry_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.entry.product == entry.product)
        {
            line.quantity += 1;

            tracing::debug!(quantity = line.quantity, "cart line merged");

            return Ok(());
        }

        tracing::debug!(name = %entry.name, "cart line added");

        self.lines.push(CartLine { entry, quantity: 1 });

        Ok(())
    }

    /// Delete the line for the given product. No-op if absent.
    pub fn remove(&mut self, product: ProductKey) {
        self.lines.retain(|line| line.entry.product != product);
    }

    /// Replace the quantity of the line for the given product.
    ///
    /// A quantity of zero is silently ignored; a line leaves the cart only
    /// through [`Cart::remove`] or [`Cart::clear`]. No-op if the product has
    /// no line.
    pub fn set_quantity(&mut self, product: ProductKey, quantity: u32) {
        if quantity < 1 {
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.entry.product == product)
        {
            line.quantity = quantity;

            tracing::debug!(quantity, "cart line quantity updated");
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    /// Sum of unit price times quantity over all lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a line total or the running sum overflows.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, CartError> {
        let minor = self.lines.iter().try_fold(0_i64, |acc, line| {
            acc.checked_add(line.line_total()?.to_minor_units())
                .ok_or(CartError::AmountOverflow)
        })?;

        Ok(Money::from_minor(minor, self.currency))
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn line(&self, product: ProductKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.entry.product == product)
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{INR, USD};
    use testresult::TestResult;

    use super::*;

    fn entry(key: ProductKey, name: &str, price_minor: i64) -> CartEntry {
        CartEntry {
            product: key,
            name: name.to_string(),
            unit_price: Money::from_minor(price_minor, INR),
            image: format!("{name}.jpg"),
            category: "general".to_string(),
        }
    }

    /// Mint a distinct product key for tests.
    fn key(catalog: &mut Catalog) -> ProductKey {
        catalog.insert(Product {
            name: "test".to_string(),
            price: Money::from_minor(100, INR),
            image: String::new(),
            category: String::new(),
        })
    }

    #[test]
    fn add_appends_new_line_with_quantity_one() -> TestResult {
        let mut catalog = Catalog::new();
        let kettle = key(&mut catalog);

        let mut cart = Cart::new(INR);
        cart.add(entry(kettle, "Kettle", 149_900))?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 1);

        Ok(())
    }

    #[test]
    fn add_twice_merges_into_one_line() -> TestResult {
        let mut catalog = Catalog::new();
        let kettle = key(&mut catalog);

        let mut cart = Cart::new(INR);
        cart.add(entry(kettle, "Kettle", 149_900))?;
        cart.add(entry(kettle, "Kettle", 149_900))?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 2);

        Ok(())
    }

    #[test]
    fn merge_keeps_first_write_descriptive_fields() -> TestResult {
        let mut catalog = Catalog::new();
        let kettle = key(&mut catalog);

        let mut cart = Cart::new(INR);
        cart.add(entry(kettle, "Kettle", 149_900))?;
        cart.add(entry(kettle, "Renamed Kettle", 999_900))?;

        let line = cart.line(kettle).expect("line should exist");

        assert_eq!(line.name(), "Kettle");
        assert_eq!(line.unit_price(), &Money::from_minor(149_900, INR));
        assert_eq!(line.quantity(), 2);

        Ok(())
    }

    #[test]
    fn add_with_wrong_currency_errors() {
        let mut catalog = Catalog::new();
        let kettle = key(&mut catalog);

        let mut cart = Cart::new(INR);

        let foreign = CartEntry {
            product: kettle,
            name: "Kettle".to_string(),
            unit_price: Money::from_minor(100, USD),
            image: String::new(),
            category: String::new(),
        };

        let result = cart.add(foreign);

        match result {
            Err(CartError::CurrencyMismatch(line, cart_code)) => {
                assert_eq!(line, USD.iso_alpha_code);
                assert_eq!(cart_code, INR.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn remove_deletes_line_and_tolerates_absence() -> TestResult {
        let mut catalog = Catalog::new();
        let kettle = key(&mut catalog);
        let mug = key(&mut catalog);

        let mut cart = Cart::new(INR);
        cart.add(entry(kettle, "Kettle", 149_900))?;

        cart.remove(mug);
        assert_eq!(cart.len(), 1);

        cart.remove(kettle);
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn set_quantity_replaces_quantity() -> TestResult {
        let mut catalog = Catalog::new();
        let kettle = key(&mut catalog);

        let mut cart = Cart::new(INR);
        cart.add(entry(kettle, "Kettle", 149_900))?;

        cart.set_quantity(kettle, 5);

        assert_eq!(cart.total_items(), 5);

        Ok(())
    }

    #[test]
    fn set_quantity_zero_is_a_no_op() -> TestResult {
        let mut catalog = Catalog::new();
        let kettle = key(&mut catalog);

        let mut cart = Cart::new(INR);
        cart.add(entry(kettle, "Kettle", 149_900))?;
        cart.add(entry(kettle, "Kettle", 149_900))?;

        cart.set_quantity(kettle, 0);

        let line = cart.line(kettle).expect("line should exist");
        assert_eq!(line.quantity(), 2);

        Ok(())
    }

    #[test]
    fn set_quantity_for_missing_line_is_a_no_op() {
        let mut catalog = Catalog::new();
        let kettle = key(&mut catalog);

        let mut cart = Cart::new(INR);
        cart.set_quantity(kettle, 3);

        assert!(cart.is_empty());
    }

    #[test]
    fn subtotal_sums_price_times_quantity() -> TestResult {
        let mut catalog = Catalog::new();
        let kettle = key(&mut catalog);
        let mug = key(&mut catalog);

        let mut cart = Cart::new(INR);
        cart.add(entry(kettle, "Kettle", 100_000))?;
        cart.add(entry(kettle, "Kettle", 100_000))?;
        cart.add(entry(mug, "Mug", 50_000))?;

        assert_eq!(cart.subtotal()?, Money::from_minor(250_000, INR));

        Ok(())
    }

    #[test]
    fn subtotal_of_empty_cart_is_zero() -> TestResult {
        let cart = Cart::new(INR);

        assert_eq!(cart.subtotal()?, Money::from_minor(0, INR));

        Ok(())
    }

    #[test]
    fn total_items_equals_sum_of_quantities() -> TestResult {
        let mut catalog = Catalog::new();
        let first = key(&mut catalog);
        let second = key(&mut catalog);
        let third = key(&mut catalog);

        let mut cart = Cart::new(INR);

        for product in [first, second, third] {
            cart.add(entry(product, "P", 100))?;
        }

        cart.set_quantity(second, 4);

        assert_eq!(cart.total_items(), 1 + 4 + 1);
        assert_eq!(cart.len(), 3);

        Ok(())
    }

    #[test]
    fn clear_empties_the_cart() -> TestResult {
        let mut catalog = Catalog::new();
        let kettle = key(&mut catalog);
        let mug = key(&mut catalog);

        let mut cart = Cart::new(INR);
        cart.add(entry(kettle, "Kettle", 149_900))?;
        cart.add(entry(mug, "Mug", 24_900))?;

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);

        Ok(())
    }

    #[test]
    fn line_total_multiplies_unit_price() -> TestResult {
        let mut catalog = Catalog::new();
        let kettle = key(&mut catalog);

        let mut cart = Cart::new(INR);
        cart.add(entry(kettle, "Kettle", 149_900))?;
        cart.set_quantity(kettle, 3);

        let line = cart.line(kettle).expect("line should exist");

        assert_eq!(line.line_total()?, Money::from_minor(449_700, INR));

        Ok(())
    }
}
