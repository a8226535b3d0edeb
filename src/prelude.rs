//! Bazaar prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartEntry, CartError, CartLine},
    checkout::{
        Checkout, CheckoutData, CheckoutError, OrderConfirmation, Step, ValidationError,
        address::{Address, AddressDraft, AddressSelection},
        delivery::DeliveryOption,
        payment::{CardDetails, PaymentMethod},
    },
    notify::{NoopNotifier, Notification, Notifier, Severity},
    otp::{OtpChallenge, OtpError, OtpVerifier, StubOtpVerifier},
    pricing::{OrderTotals, PricingError, order_totals, rounded_major, tax_on},
    products::{
        Catalog, Product, ProductKey,
        specs::{Specification, SpecificationError},
    },
    receipt::{Receipt, ReceiptError},
    session::{
        AddressBook, AddressKey, AddressKind, IdentityProvider, SavedAddress, Session, Shopper,
    },
    store::{Store, StoreError},
    wishlist::Wishlist,
};
