//! Delivery Options

use std::{fmt, str::FromStr};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown delivery option name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown delivery option {0:?}")]
pub struct UnknownDeliveryOption(pub String);

/// How the order is shipped.
///
/// The fee table here is the single source of truth for delivery pricing;
/// every total shown to the shopper prices delivery through [`DeliveryOption::fee`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryOption {
    /// Standard delivery, free of charge.
    #[default]
    Standard,

    /// Express delivery.
    Express,

    /// Same-day delivery.
    SameDay,
}

impl DeliveryOption {
    /// All options, in display order.
    pub const ALL: [DeliveryOption; 3] = [
        DeliveryOption::Standard,
        DeliveryOption::Express,
        DeliveryOption::SameDay,
    ];

    /// Fee in major units of the order currency.
    fn fee_major(self) -> i64 {
        match self {
            DeliveryOption::Standard => 0,
            DeliveryOption::Express => 150,
            DeliveryOption::SameDay => 300,
        }
    }

    /// Delivery fee in the given currency.
    #[must_use]
    pub fn fee(self, currency: &'static Currency) -> Money<'static, Currency> {
        let minor_per_major = 10_i64.pow(currency.exponent);

        Money::from_minor(self.fee_major() * minor_per_major, currency)
    }

    /// Display label for the option.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DeliveryOption::Standard => "Standard (4-7 days)",
            DeliveryOption::Express => "Express (1-2 days)",
            DeliveryOption::SameDay => "Same Day",
        }
    }

    /// Stable tag used in serialized data and CLI arguments.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            DeliveryOption::Standard => "standard",
            DeliveryOption::Express => "express",
            DeliveryOption::SameDay => "same-day",
        }
    }
}

impl fmt::Display for DeliveryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DeliveryOption {
    type Err = UnknownDeliveryOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(DeliveryOption::Standard),
            "express" => Ok(DeliveryOption::Express),
            "same-day" => Ok(DeliveryOption::SameDay),
            other => Err(UnknownDeliveryOption(other.to_string())),
        }
    }
}
