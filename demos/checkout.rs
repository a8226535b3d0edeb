//! Checkout Demo
//!
//! Walks a shopper through the whole flow: add demo products to the cart,
//! step through checkout, print the receipt, and place the order.
//!
//! Use `-n` to control how many demo products go into the cart
//! Use `-d` to pick the delivery option (standard, express, same-day)
//! Use `-s` to ship to the demo shopper's default saved address

use std::io;

use anyhow::{Result, anyhow};
use clap::Parser;

use bazaar::{
    fixtures::{demo_session, demo_store},
    prelude::*,
    utils::DemoCheckoutArgs,
};

/// Prints every notification the storefront raises.
#[derive(Debug, Default)]
struct PrintNotifier;

#[expect(clippy::print_stdout, reason = "Example code")]
impl Notifier for PrintNotifier {
    fn notify(&mut self, notification: Notification) {
        println!(
            "[{:?}] {}: {}",
            notification.severity, notification.title, notification.description
        );
    }
}

/// Resolves the demo shopper.
#[derive(Debug, Default)]
struct DemoIdentity;

impl IdentityProvider for DemoIdentity {
    fn current_session(&self) -> Option<Session> {
        Some(demo_session())
    }
}

/// Checkout Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoCheckoutArgs::parse();
    let delivery: DeliveryOption = args.delivery.parse()?;

    let (mut store, keys) = demo_store();
    let mut notifier = PrintNotifier;

    store.sign_in(&DemoIdentity);

    let count = args.n.unwrap_or(3).min(keys.len());

    for key in keys.iter().take(count) {
        store.add_to_cart(*key, &mut notifier)?;
    }

    let mut checkout = store.begin_checkout()?;

    checkout.confirm_review()?;

    let selection = if args.saved_address {
        let session = store.session().ok_or_else(|| anyhow!("not signed in"))?;

        let (key, _) = session
            .addresses
            .default_entry()
            .ok_or_else(|| anyhow!("no default saved address"))?;

        AddressSelection::Saved(key)
    } else {
        AddressSelection::New(AddressDraft {
            full_name: "Asha Rao".to_string(),
            street: "12 Lake Road".to_string(),
            city: "Mumbai".to_string(),
            state: "MH".to_string(),
            postal_code: "400001".to_string(),
            phone: "98200 00000".to_string(),
        })
    };

    let session = store.session().cloned();

    checkout.submit_address(selection, session.as_ref(), &mut notifier)?;

    checkout.submit_payment(
        PaymentMethod::Upi {
            id: "asha@bank".to_string(),
        },
        &mut notifier,
    )?;

    checkout.submit_delivery(delivery)?;

    let receipt = Receipt::from_cart(store.cart(), delivery)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle)?;

    let confirmation = store.place_order(&mut checkout, &mut notifier)?;

    println!(
        "Shipping to {}, {} by {}",
        confirmation.address.street,
        confirmation.address.city,
        confirmation.delivery.label()
    );

    Ok(())
}
