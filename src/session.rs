//! Sessions
//!
//! The identity/session collaborator: the current shopper (or none) and the
//! saved addresses their profile offers during checkout. The storefront never
//! manages credentials itself; it consumes whatever the provider resolves.

use mockall::automock;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};

use crate::checkout::address::Address;

new_key_type! {
    /// Address Key
    pub struct AddressKey;
}

/// Kind of saved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressKind {
    /// Home address
    Home,

    /// Work address
    Work,

    /// Anything else
    Other,
}

/// A saved address book entry from the shopper's profile.
///
/// Entries are pre-validated by the profile service; checkout accepts them
/// without re-running the new-address checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAddress {
    /// Street line
    pub street: String,

    /// City
    pub city: String,

    /// State or region
    pub state: String,

    /// Postal code
    pub zip_code: String,

    /// Whether this entry is the profile default
    pub is_default: bool,

    /// Entry kind
    pub kind: AddressKind,
}

impl SavedAddress {
    /// Build a checkout [`Address`] for the given recipient.
    #[must_use]
    pub fn to_address(&self, recipient: &str) -> Address {
        Address {
            full_name: recipient.to_string(),
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.zip_code.clone(),
            phone: String::new(),
        }
    }
}

/// Saved addresses keyed by [`AddressKey`].
#[derive(Debug, Default, Clone)]
pub struct AddressBook {
    addresses: SlotMap<AddressKey, SavedAddress>,
}

impl AddressBook {
    /// Create an empty address book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry and return its key.
    pub fn insert(&mut self, address: SavedAddress) -> AddressKey {
        self.addresses.insert(address)
    }

    /// Look up an entry by key.
    #[must_use]
    pub fn get(&self, key: AddressKey) -> Option<&SavedAddress> {
        self.addresses.get(key)
    }

    /// The profile default entry, if any.
    #[must_use]
    pub fn default_entry(&self) -> Option<(AddressKey, &SavedAddress)> {
        self.addresses.iter().find(|(_, entry)| entry.is_default)
    }

    /// Iterate over the entries in the book.
    pub fn iter(&self) -> impl Iterator<Item = (AddressKey, &SavedAddress)> {
        self.addresses.iter()
    }

    /// Get the number of entries in the book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Check if the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// The signed-in shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shopper {
    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,
}

/// A resolved shopper session: identity plus saved addresses.
#[derive(Debug, Clone)]
pub struct Session {
    /// The signed-in shopper
    pub shopper: Shopper,

    /// The shopper's saved addresses
    pub addresses: AddressBook,
}

/// Resolves the current shopper session, if any.
#[automock]
pub trait IdentityProvider {
    /// The current session, or `None` when no shopper is signed in.
    fn current_session(&self) -> Option<Session>;
}
