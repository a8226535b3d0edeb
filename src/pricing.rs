//! Pricing
//!
//! Pure derivation of order totals from the cart and the selected delivery
//! option. Identical inputs always yield identical totals; nothing here reads
//! or writes state.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    checkout::delivery::DeliveryOption,
};

/// Flat tax rate applied to the cart subtotal, in percent. Delivery fees are
/// not taxed.
pub const TAX_RATE_PERCENT: i64 = 18;

/// Errors that can occur while deriving order totals.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Errors bubbled up from cart subtotal calculation.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// A decimal conversion overflowed or was not representable.
    #[error("amount conversion overflowed or was not representable")]
    Conversion,
}

/// Derived totals for an order. Never cached; recompute via [`order_totals`]
/// whenever the cart or the delivery choice changes.
#[derive(Debug, Clone, Copy)]
pub struct OrderTotals<'a> {
    subtotal: Money<'a, Currency>,
    tax: Money<'a, Currency>,
    delivery_fee: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> OrderTotals<'a> {
    /// Sum of unit price times quantity over all cart lines.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Tax charged on the subtotal.
    #[must_use]
    pub fn tax(&self) -> Money<'a, Currency> {
        self.tax
    }

    /// Fee for the selected delivery option.
    #[must_use]
    pub fn delivery_fee(&self) -> Money<'a, Currency> {
        self.delivery_fee
    }

    /// Grand total: subtotal + tax + delivery fee.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }
}

/// Derive subtotal, tax, delivery fee and grand total for the cart.
///
/// Amounts are computed in minor units; use [`rounded_major`] where a display
/// surface wants whole-unit figures.
///
/// # Errors
///
/// Returns a [`PricingError`] if the cart subtotal cannot be calculated or
/// money arithmetic fails.
pub fn order_totals<'a>(
    cart: &Cart,
    delivery: DeliveryOption,
) -> Result<OrderTotals<'a>, PricingError> {
    let subtotal = cart.subtotal()?;
    let tax = tax_on(&subtotal)?;
    let delivery_fee = delivery.fee(cart.currency());

    let total = subtotal.add(tax)?.add(delivery_fee)?;

    Ok(OrderTotals {
        subtotal,
        tax,
        delivery_fee,
        total,
    })
}

/// Tax due on an amount, rounded half-up to the nearest minor unit.
///
/// # Errors
///
/// Returns [`PricingError::Conversion`] if the amount cannot be represented
/// during decimal arithmetic.
pub fn tax_on<'a>(amount: &Money<'a, Currency>) -> Result<Money<'a, Currency>, PricingError> {
    let Some(minor) = Decimal::from_i64(amount.to_minor_units()) else {
        return Err(PricingError::Conversion);
    };

    let rate = Decimal::new(TAX_RATE_PERCENT, 2);

    let Some(taxed) = minor.checked_mul(rate) else {
        return Err(PricingError::Conversion);
    };

    let rounded = taxed.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let Some(rounded) = rounded.to_i64() else {
        return Err(PricingError::Conversion);
    };

    Ok(Money::from_minor(rounded, amount.currency()))
}

/// Round an amount half-up to whole major units, for display.
///
/// # Errors
///
/// Returns [`PricingError::Conversion`] if the amount cannot be represented
/// during decimal arithmetic.
pub fn rounded_major(amount: &Money<'_, Currency>) -> Result<i64, PricingError> {
    let Some(minor) = Decimal::from_i64(amount.to_minor_units()) else {
        return Err(PricingError::Conversion);
    };

    let Some(minor_per_major) = Decimal::from_i64(10_i64.pow(amount.currency().exponent)) else {
        return Err(PricingError::Conversion);
    };

    let major = (minor / minor_per_major)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    major.to_i64().ok_or(PricingError::Conversion)
}
