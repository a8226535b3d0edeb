//! Addresses

use serde::{Deserialize, Serialize};

use crate::{checkout::ValidationError, session::AddressKey};

/// A complete delivery address, as accumulated by the checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Recipient name
    pub full_name: String,

    /// Street line
    pub street: String,

    /// City
    pub city: String,

    /// State or region
    pub state: String,

    /// Postal code
    pub postal_code: String,

    /// Contact phone
    pub phone: String,
}

/// Form input for a new address. Fields may be blank until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDraft {
    /// Recipient name
    pub full_name: String,

    /// Street line
    pub street: String,

    /// City
    pub city: String,

    /// State or region
    pub state: String,

    /// Postal code
    pub postal_code: String,

    /// Contact phone
    pub phone: String,
}

impl AddressDraft {
    /// Validate the draft into a complete [`Address`].
    ///
    /// Recipient name, street, and city must be present; the remaining fields
    /// pass through as entered.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] naming each blank required
    /// field.
    pub fn validate(&self) -> Result<Address, ValidationError> {
        let mut missing = Vec::new();

        if self.full_name.trim().is_empty() {
            missing.push("full name");
        }

        if self.street.trim().is_empty() {
            missing.push("street");
        }

        if self.city.trim().is_empty() {
            missing.push("city");
        }

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        Ok(Address {
            full_name: self.full_name.clone(),
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            phone: self.phone.clone(),
        })
    }
}

/// The shopper's choice on the address step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressSelection {
    /// A saved profile address, accepted as-is.
    Saved(AddressKey),

    /// A newly entered address, validated before acceptance.
    New(AddressDraft),
}
