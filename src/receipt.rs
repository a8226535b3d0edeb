//! Receipt
//!
//! Renders the order summary: one row per cart line plus the totals block.
//! Amounts are formatted by the currency itself (symbol prefix, grouped
//! thousands); the totals are derived fresh from the cart at build time.

use std::io;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Color, Style, Theme, object::{Columns, Rows}},
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    checkout::delivery::DeliveryOption,
    pricing::{OrderTotals, PricingError, TAX_RATE_PERCENT, order_totals},
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating a line total.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Error deriving the order totals.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One rendered line of the receipt.
#[derive(Debug, Clone)]
pub struct ReceiptLine {
    /// Display name
    pub name: String,

    /// Category label
    pub category: String,

    /// Quantity purchased
    pub quantity: u32,

    /// Unit price
    pub unit_price: Money<'static, Currency>,

    /// Unit price times quantity
    pub line_total: Money<'static, Currency>,
}

/// Order summary for a cart and delivery choice.
#[derive(Debug, Clone)]
pub struct Receipt {
    lines: SmallVec<[ReceiptLine; 10]>,
    delivery: DeliveryOption,
    totals: OrderTotals<'static>,
}

impl Receipt {
    /// Build a receipt from the cart and the chosen delivery option.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a line total or the order totals cannot
    /// be calculated.
    pub fn from_cart(cart: &Cart, delivery: DeliveryOption) -> Result<Self, ReceiptError> {
        let mut lines = SmallVec::new();

        for line in cart.iter() {
            lines.push(ReceiptLine {
                name: line.name().to_string(),
                category: line.category().to_string(),
                quantity: line.quantity(),
                unit_price: *line.unit_price(),
                line_total: line.line_total()?,
            });
        }

        Ok(Receipt {
            lines,
            delivery,
            totals: order_totals(cart, delivery)?,
        })
    }

    /// The rendered lines, in cart order.
    #[must_use]
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// The delivery option the receipt prices.
    #[must_use]
    pub fn delivery(&self) -> DeliveryOption {
        self.delivery
    }

    /// The derived totals.
    #[must_use]
    pub fn totals(&self) -> &OrderTotals<'static> {
        &self.totals
    }

    /// Write the receipt table and totals block.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Category", "Qty", "Unit Price", "Amount"]);

        for line in &self.lines {
            builder.push_record([
                line.name.clone(),
                line.category.clone(),
                line.quantity.to_string(),
                line.unit_price.to_string(),
                line.line_total.to_string(),
            ]);
        }

        write_receipt_table(&mut out, builder)?;
        write_totals_block(&mut out, self)?;

        Ok(())
    }
}

fn write_receipt_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)
}

fn write_totals_block(out: &mut impl io::Write, receipt: &Receipt) -> Result<(), ReceiptError> {
    let totals = receipt.totals();

    let subtotal_label = " Subtotal:".to_string();
    let tax_label = format!(" Tax ({TAX_RATE_PERCENT}%):");
    let delivery_label = format!(" Delivery ({}):", receipt.delivery().tag());
    let total_label = " Total:".to_string();

    let label_width = [&subtotal_label, &tax_label, &delivery_label, &total_label]
        .iter()
        .map(|label| label.len())
        .max()
        .unwrap_or(0);

    let rows = [
        (subtotal_label, totals.subtotal().to_string(), false),
        (tax_label, totals.tax().to_string(), false),
        (delivery_label, totals.delivery_fee().to_string(), false),
        (total_label, totals.total().to_string(), true),
    ];

    let value_width = rows
        .iter()
        .map(|(_, value, _)| value.len())
        .max()
        .unwrap_or(0);

    for (label, value, bold) in rows {
        if bold {
            writeln!(
                out,
                "\x1b[1m{label:<label_width$} {value:>value_width$}\x1b[0m"
            )
            .map_err(|_err| ReceiptError::IO)?;
        } else {
            writeln!(out, "{label:<label_width$} {value:>value_width$}")
                .map_err(|_err| ReceiptError::IO)?;
        }
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}
