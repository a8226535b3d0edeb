//! Checkout
//!
//! Drives the shopper through five ordered steps (Review, Address, Payment,
//! Delivery, Summary), accumulating one [`CheckoutData`] field per step.
//! Forward progress is gated on per-step validation; `back` never mutates the
//! accumulator. Placing the order clears the cart and ends the flow.

use std::fmt;

use thiserror::Error;

use crate::{
    cart::Cart,
    checkout::{
        address::{Address, AddressSelection},
        delivery::DeliveryOption,
        payment::PaymentMethod,
    },
    notify::{Notification, Notifier},
    pricing::{OrderTotals, PricingError, order_totals},
    session::Session,
};

pub mod address;
pub mod delivery;
pub mod payment;

/// A step's required fields were incomplete. Recoverable: the shopper edits
/// and resubmits; nothing advances.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields were blank.
    #[error("required fields missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// The five checkout steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Confirm the cart contents.
    Review,

    /// Choose or enter a delivery address.
    Address,

    /// Choose a payment method.
    Payment,

    /// Choose a delivery option.
    Delivery,

    /// Final summary; the order is placed from here.
    Summary,
}

impl Step {
    /// All steps, in flow order. Drives the step indicator.
    pub const ALL: [Step; 5] = [
        Step::Review,
        Step::Address,
        Step::Payment,
        Step::Delivery,
        Step::Summary,
    ];

    /// One-based position of the step in the flow.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Step::Review => 1,
            Step::Address => 2,
            Step::Payment => 3,
            Step::Delivery => 4,
            Step::Summary => 5,
        }
    }

    /// Display title for the step indicator.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Step::Review => "Review Order",
            Step::Address => "Address",
            Step::Payment => "Payment",
            Step::Delivery => "Delivery",
            Step::Summary => "Summary",
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::Review => Some(Step::Address),
            Step::Address => Some(Step::Payment),
            Step::Payment => Some(Step::Delivery),
            Step::Delivery => Some(Step::Summary),
            Step::Summary => None,
        }
    }

    fn previous(self) -> Option<Step> {
        match self {
            Step::Review => None,
            Step::Address => Some(Step::Review),
            Step::Payment => Some(Step::Address),
            Step::Delivery => Some(Step::Payment),
            Step::Summary => Some(Step::Delivery),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// The accumulator the steps fill in, one field each.
#[derive(Debug, Default, Clone)]
pub struct CheckoutData {
    address: Option<Address>,
    payment: Option<PaymentMethod>,
    delivery: Option<DeliveryOption>,
}

impl CheckoutData {
    /// The accepted delivery address, once the address step has passed.
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// The accepted payment method, once the payment step has passed.
    #[must_use]
    pub fn payment(&self) -> Option<&PaymentMethod> {
        self.payment.as_ref()
    }

    /// The chosen delivery option, once the delivery step has passed.
    #[must_use]
    pub fn delivery(&self) -> Option<DeliveryOption> {
        self.delivery
    }

    /// Whether every step has contributed its field.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.address.is_some() && self.payment.is_some() && self.delivery.is_some()
    }
}

/// Errors raised by the checkout sequencer.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout cannot begin with an empty cart.
    #[error("cart is empty; nothing to check out")]
    EmptyCart,

    /// An operation belonging to another step was invoked.
    #[error("the {actual} step is active, expected {expected}")]
    WrongStep {
        /// Step the operation belongs to.
        expected: Step,

        /// Step that is actually active.
        actual: Step,
    },

    /// A saved address was chosen but no shopper is signed in.
    #[error("no shopper session; a saved address cannot be used")]
    NoSession,

    /// The chosen saved address is not in the shopper's address book.
    #[error("saved address not found")]
    UnknownSavedAddress,

    /// The summary was reached with an unfilled accumulator field.
    #[error("checkout data is incomplete")]
    Incomplete,

    /// The order was already placed through this flow.
    #[error("order already placed")]
    AlreadyPlaced,

    /// A step's required fields were incomplete.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Errors bubbled up from total calculation.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Confirmation returned when the order is placed.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    /// Delivery address for the order
    pub address: Address,

    /// Payment method for the order
    pub payment: PaymentMethod,

    /// Delivery option for the order
    pub delivery: DeliveryOption,

    /// Totals charged
    pub totals: OrderTotals<'static>,
}

/// The checkout sequencer.
///
/// Created against a non-empty cart; advances one step per accepted
/// submission; never skips forward past an unvisited step.
#[derive(Debug)]
pub struct Checkout {
    step: Step,
    data: CheckoutData,
    placed: bool,
}

impl Checkout {
    /// Begin checkout for the given cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines; the
    /// caller should show the "nothing to check out" view instead.
    pub fn begin(cart: &Cart) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Checkout {
            step: Step::Review,
            data: CheckoutData::default(),
            placed: false,
        })
    }

    /// The currently active step.
    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    /// The accumulated checkout data.
    #[must_use]
    pub fn data(&self) -> &CheckoutData {
        &self.data
    }

    /// Confirm the reviewed cart and move to the address step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] if review is not the active step.
    pub fn confirm_review(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(Step::Review)?;
        self.advance();

        Ok(())
    }

    /// Submit the address step.
    ///
    /// A new address must pass [`address::AddressDraft::validate`]; a saved
    /// address is accepted as-is from the session's address book.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] if address is not the active step,
    /// [`CheckoutError::Validation`] if a new address is incomplete,
    /// [`CheckoutError::NoSession`] / [`CheckoutError::UnknownSavedAddress`]
    /// if a saved address cannot be resolved. On failure nothing advances.
    pub fn submit_address<N: Notifier>(
        &mut self,
        selection: AddressSelection,
        session: Option<&Session>,
        notifier: &mut N,
    ) -> Result<(), CheckoutError> {
        self.expect_step(Step::Address)?;

        let address = match selection {
            AddressSelection::New(draft) => match draft.validate() {
                Ok(address) => address,
                Err(err) => {
                    notifier.notify(Notification::error("Address incomplete", err.to_string()));

                    return Err(err.into());
                }
            },
            AddressSelection::Saved(key) => {
                let session = session.ok_or(CheckoutError::NoSession)?;

                let entry = session
                    .addresses
                    .get(key)
                    .ok_or(CheckoutError::UnknownSavedAddress)?;

                entry.to_address(&session.shopper.name)
            }
        };

        self.data.address = Some(address);
        self.advance();

        Ok(())
    }

    /// Submit the payment step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] if payment is not the active step,
    /// or [`CheckoutError::Validation`] if the method's fields are incomplete.
    /// On failure nothing advances.
    pub fn submit_payment<N: Notifier>(
        &mut self,
        method: PaymentMethod,
        notifier: &mut N,
    ) -> Result<(), CheckoutError> {
        self.expect_step(Step::Payment)?;

        if let Err(err) = method.validate() {
            notifier.notify(Notification::error("Payment incomplete", err.to_string()));

            return Err(err.into());
        }

        self.data.payment = Some(method);
        self.advance();

        Ok(())
    }

    /// Submit the delivery step. Any option is acceptable.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] if delivery is not the active step.
    pub fn submit_delivery(&mut self, option: DeliveryOption) -> Result<(), CheckoutError> {
        self.expect_step(Step::Delivery)?;

        self.data.delivery = Some(option);
        self.advance();

        Ok(())
    }

    /// Step back without touching the accumulator. Floors at the first step.
    pub fn back(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;

            tracing::debug!(step = %self.step, "checkout stepped back");
        }
    }

    /// Current totals for the sidebar and summary.
    ///
    /// Always recomputed from the live cart; prices the chosen delivery
    /// option, or the default option before the delivery step has passed.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the totals cannot be derived.
    pub fn totals<'a>(&self, cart: &Cart) -> Result<OrderTotals<'a>, PricingError> {
        order_totals(cart, self.data.delivery.unwrap_or_default())
    }

    /// Place the order. Only available from the summary step.
    ///
    /// Clears the cart, notifies the shopper, and returns the confirmation.
    /// The sequencer cannot be reused afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] away from the summary step,
    /// [`CheckoutError::AlreadyPlaced`] on reuse, or a pricing error if the
    /// totals cannot be derived.
    pub fn place_order<N: Notifier>(
        &mut self,
        cart: &mut Cart,
        notifier: &mut N,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if self.placed {
            return Err(CheckoutError::AlreadyPlaced);
        }

        self.expect_step(Step::Summary)?;

        let (Some(address), Some(payment), Some(delivery)) = (
            self.data.address.clone(),
            self.data.payment.clone(),
            self.data.delivery,
        ) else {
            return Err(CheckoutError::Incomplete);
        };

        let totals = order_totals(cart, delivery)?;

        cart.clear();
        self.placed = true;

        tracing::info!(total = %totals.total(), %delivery, "order placed");

        notifier.notify(Notification::success(
            "Order placed",
            format!("Payable {}", totals.total()),
        ));

        Ok(OrderConfirmation {
            address,
            payment,
            delivery,
            totals,
        })
    }

    fn expect_step(&self, expected: Step) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.step.next() {
            self.step = next;

            tracing::debug!(step = %self.step, "checkout advanced");
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{Currency, INR},
    };
    use testresult::TestResult;

    use crate::{
        cart::CartEntry,
        checkout::address::AddressDraft,
        notify::NoopNotifier,
        products::{Catalog, Product},
        session::{AddressBook, AddressKind, SavedAddress, Shopper},
    };

    use super::*;

    fn filled_cart(currency: &'static Currency) -> Cart {
        let mut catalog = Catalog::new();
        let mut cart = Cart::new(currency);

        let key = catalog.insert(Product {
            name: "Kettle".to_string(),
            price: Money::from_minor(100_000, currency),
            image: "kettle.jpg".to_string(),
            category: "kitchen".to_string(),
        });

        let entry = CartEntry::from_catalog(&catalog, key).expect("product should resolve");

        cart.add(entry.clone()).expect("add should succeed");
        cart.add(entry).expect("add should succeed");

        cart
    }

    fn draft() -> AddressDraft {
        AddressDraft {
            full_name: "Asha Rao".to_string(),
            street: "12 Lake Road".to_string(),
            city: "Mumbai".to_string(),
            state: "MH".to_string(),
            postal_code: "400001".to_string(),
            phone: "98200 00000".to_string(),
        }
    }

    fn session_with_saved() -> (Session, crate::session::AddressKey) {
        let mut addresses = AddressBook::new();

        let key = addresses.insert(SavedAddress {
            street: "Flat 4, Rose Court".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            zip_code: "411001".to_string(),
            is_default: true,
            kind: AddressKind::Home,
        });

        let session = Session {
            shopper: Shopper {
                name: "Asha Rao".to_string(),
                email: "asha@example.com".to_string(),
            },
            addresses,
        };

        (session, key)
    }

    fn to_summary(cart: &Cart) -> Checkout {
        let mut notifier = NoopNotifier;
        let mut checkout = Checkout::begin(cart).expect("begin should succeed");

        checkout.confirm_review().expect("review should pass");

        checkout
            .submit_address(AddressSelection::New(draft()), None, &mut notifier)
            .expect("address should pass");

        checkout
            .submit_payment(PaymentMethod::CashOnDelivery, &mut notifier)
            .expect("payment should pass");

        checkout
            .submit_delivery(DeliveryOption::Express)
            .expect("delivery should pass");

        checkout
    }

    #[test]
    fn begin_with_empty_cart_is_blocked() {
        let cart = Cart::new(INR);

        let result = Checkout::begin(&cart);

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn begin_starts_at_review() -> TestResult {
        let cart = filled_cart(INR);

        let checkout = Checkout::begin(&cart)?;

        assert_eq!(checkout.step(), Step::Review);
        assert!(!checkout.data().is_complete());

        Ok(())
    }

    #[test]
    fn steps_advance_in_order() -> TestResult {
        let cart = filled_cart(INR);
        let mut notifier = NoopNotifier;

        let mut checkout = Checkout::begin(&cart)?;
        assert_eq!(checkout.step(), Step::Review);

        checkout.confirm_review()?;
        assert_eq!(checkout.step(), Step::Address);

        checkout.submit_address(AddressSelection::New(draft()), None, &mut notifier)?;
        assert_eq!(checkout.step(), Step::Payment);

        checkout.submit_payment(PaymentMethod::NetBanking, &mut notifier)?;
        assert_eq!(checkout.step(), Step::Delivery);

        checkout.submit_delivery(DeliveryOption::Standard)?;
        assert_eq!(checkout.step(), Step::Summary);

        assert!(checkout.data().is_complete());

        Ok(())
    }

    #[test]
    fn submitting_a_later_step_early_is_rejected() -> TestResult {
        let cart = filled_cart(INR);
        let mut notifier = NoopNotifier;

        let mut checkout = Checkout::begin(&cart)?;

        let result = checkout.submit_payment(PaymentMethod::NetBanking, &mut notifier);

        assert!(matches!(
            result,
            Err(CheckoutError::WrongStep {
                expected: Step::Payment,
                actual: Step::Review,
            })
        ));

        Ok(())
    }

    #[test]
    fn invalid_address_does_not_advance() -> TestResult {
        let cart = filled_cart(INR);
        let mut notifier = NoopNotifier;

        let mut checkout = Checkout::begin(&cart)?;
        checkout.confirm_review()?;

        let mut incomplete = draft();
        incomplete.full_name = String::new();

        let result =
            checkout.submit_address(AddressSelection::New(incomplete), None, &mut notifier);

        assert!(matches!(result, Err(CheckoutError::Validation(_))));
        assert_eq!(checkout.step(), Step::Address);
        assert!(checkout.data().address().is_none());

        Ok(())
    }

    #[test]
    fn saved_address_is_accepted_without_validation() -> TestResult {
        let cart = filled_cart(INR);
        let mut notifier = NoopNotifier;
        let (session, key) = session_with_saved();

        let mut checkout = Checkout::begin(&cart)?;
        checkout.confirm_review()?;

        checkout.submit_address(AddressSelection::Saved(key), Some(&session), &mut notifier)?;

        let address = checkout.data().address().expect("address should be set");

        assert_eq!(address.full_name, "Asha Rao");
        assert_eq!(address.city, "Pune");
        assert_eq!(checkout.step(), Step::Payment);

        Ok(())
    }

    #[test]
    fn saved_address_without_session_is_rejected() -> TestResult {
        let cart = filled_cart(INR);
        let mut notifier = NoopNotifier;
        let (_, key) = session_with_saved();

        let mut checkout = Checkout::begin(&cart)?;
        checkout.confirm_review()?;

        let result = checkout.submit_address(AddressSelection::Saved(key), None, &mut notifier);

        assert!(matches!(result, Err(CheckoutError::NoSession)));
        assert_eq!(checkout.step(), Step::Address);

        Ok(())
    }

    #[test]
    fn back_steps_without_touching_data() -> TestResult {
        let cart = filled_cart(INR);
        let mut checkout = to_summary(&cart);

        checkout.back();

        assert_eq!(checkout.step(), Step::Delivery);
        assert_eq!(checkout.data().delivery(), Some(DeliveryOption::Express));
        assert!(checkout.data().address().is_some());
        assert!(checkout.data().payment().is_some());

        Ok(())
    }

    #[test]
    fn back_floors_at_review() -> TestResult {
        let cart = filled_cart(INR);

        let mut checkout = Checkout::begin(&cart)?;
        checkout.back();
        checkout.back();

        assert_eq!(checkout.step(), Step::Review);

        Ok(())
    }

    #[test]
    fn totals_before_delivery_choice_price_the_default_option() -> TestResult {
        let cart = filled_cart(INR);

        let checkout = Checkout::begin(&cart)?;
        let totals = checkout.totals(&cart)?;

        assert_eq!(totals.delivery_fee(), Money::from_minor(0, INR));
        assert_eq!(totals.subtotal(), Money::from_minor(200_000, INR));

        Ok(())
    }

    #[test]
    fn totals_track_the_chosen_delivery_option() -> TestResult {
        let cart = filled_cart(INR);
        let checkout = to_summary(&cart);

        let totals = checkout.totals(&cart)?;

        assert_eq!(totals.delivery_fee(), Money::from_minor(15_000, INR));

        Ok(())
    }

    #[test]
    fn place_order_clears_cart_and_confirms() -> TestResult {
        let mut cart = filled_cart(INR);
        let mut notifier = NoopNotifier;
        let mut checkout = to_summary(&cart);

        let confirmation = checkout.place_order(&mut cart, &mut notifier)?;

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(confirmation.delivery, DeliveryOption::Express);
        assert_eq!(
            confirmation.totals.total(),
            Money::from_minor(200_000 + 36_000 + 15_000, INR)
        );

        Ok(())
    }

    #[test]
    fn place_order_away_from_summary_is_rejected() -> TestResult {
        let mut cart = filled_cart(INR);
        let mut notifier = NoopNotifier;

        let mut checkout = Checkout::begin(&cart)?;

        let result = checkout.place_order(&mut cart, &mut notifier);

        assert!(matches!(result, Err(CheckoutError::WrongStep { .. })));
        assert!(!cart.is_empty());

        Ok(())
    }

    #[test]
    fn place_order_twice_is_rejected() -> TestResult {
        let mut cart = filled_cart(INR);
        let mut notifier = NoopNotifier;
        let mut checkout = to_summary(&cart);

        checkout.place_order(&mut cart, &mut notifier)?;

        let result = checkout.place_order(&mut cart, &mut notifier);

        assert!(matches!(result, Err(CheckoutError::AlreadyPlaced)));

        Ok(())
    }

    #[test]
    fn step_indicator_declares_five_ordered_steps() {
        assert_eq!(Step::ALL.len(), 5);

        let numbers: Vec<u8> = Step::ALL.iter().map(|step| step.number()).collect();

        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(Step::Review.title(), "Review Order");
    }
}
