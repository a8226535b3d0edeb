//! Payment Methods

use serde::{Deserialize, Serialize};

use crate::checkout::ValidationError;

/// Card form fields for the credit-card method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// Name on the card
    pub holder: String,

    /// Card number
    pub number: String,

    /// Expiry, as printed (MM/YY)
    pub expiry: String,

    /// Security code
    pub cvv: String,
}

/// The shopper's payment choice.
///
/// Each method carries only its own fields; selecting a method can never leave
/// stale fields from another method behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Pay by card; all four card fields are required.
    CreditCard(CardDetails),

    /// Pay by UPI; the id is required.
    Upi {
        /// UPI id, e.g. `name@bank`
        id: String,
    },

    /// Net banking; the bank is chosen on the provider's own pages.
    NetBanking,

    /// Cash on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    /// Display label for the method.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard(_) => "Credit / Debit Card",
            PaymentMethod::Upi { .. } => "UPI",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Validate the method's own fields.
    ///
    /// Net banking and cash on delivery need nothing beyond selection.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] naming each blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();

        match self {
            PaymentMethod::CreditCard(card) => {
                if card.holder.trim().is_empty() {
                    missing.push("card holder");
                }

                if card.number.trim().is_empty() {
                    missing.push("card number");
                }

                if card.expiry.trim().is_empty() {
                    missing.push("expiry");
                }

                if card.cvv.trim().is_empty() {
                    missing.push("cvv");
                }
            }
            PaymentMethod::Upi { id } => {
                if id.trim().is_empty() {
                    missing.push("upi id");
                }
            }
            PaymentMethod::NetBanking | PaymentMethod::CashOnDelivery => {}
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }
}
