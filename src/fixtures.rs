//! Fixtures
//!
//! Small in-memory data sets for the demos and integration tests.

use rusty_money::{Money, iso};

use crate::{
    products::{Catalog, Product, ProductKey, specs::Specification},
    session::{AddressBook, AddressKind, SavedAddress, Session, Shopper},
    store::Store,
};

/// Build the demo catalog and return the keys in insertion order.
#[must_use]
pub fn demo_catalog() -> (Catalog, Vec<ProductKey>) {
    let mut catalog = Catalog::new();

    let products = [
        ("Electric Kettle", 149_900, "kettle.jpg", "kitchen"),
        ("Stoneware Mug", 24_900, "mug.jpg", "kitchen"),
        ("Linen Shirt", 199_900, "shirt.jpg", "apparel"),
        ("Trail Running Shoes", 549_900, "shoes.jpg", "footwear"),
        ("Masala Chai, 250g", 34_900, "chai.jpg", "grocery"),
    ];

    let keys = products
        .into_iter()
        .map(|(name, price_minor, image, category)| {
            catalog.insert(Product {
                name: name.to_string(),
                price: Money::from_minor(price_minor, iso::INR),
                image: image.to_string(),
                category: category.to_string(),
            })
        })
        .collect();

    (catalog, keys)
}

/// A store over the demo catalog.
#[must_use]
pub fn demo_store() -> (Store, Vec<ProductKey>) {
    let (catalog, keys) = demo_catalog();

    (Store::with_catalog(catalog, iso::INR), keys)
}

/// A signed-in shopper with one default and one secondary saved address.
#[must_use]
pub fn demo_session() -> Session {
    let mut addresses = AddressBook::new();

    addresses.insert(SavedAddress {
        street: "12 Lake Road".to_string(),
        city: "Mumbai".to_string(),
        state: "MH".to_string(),
        zip_code: "400001".to_string(),
        is_default: true,
        kind: AddressKind::Home,
    });

    addresses.insert(SavedAddress {
        street: "4th Floor, Nariman House".to_string(),
        city: "Mumbai".to_string(),
        state: "MH".to_string(),
        zip_code: "400021".to_string(),
        is_default: false,
        kind: AddressKind::Work,
    });

    Session {
        shopper: Shopper {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
        },
        addresses,
    }
}

/// Sample specification sheets, one per demo product type.
#[must_use]
pub fn demo_specifications() -> Vec<Specification> {
    vec![
        Specification::Apparel {
            size: "M".to_string(),
            fabric: "100% linen".to_string(),
        },
        Specification::Electronics {
            brand: "Volta".to_string(),
            model: "VK-2".to_string(),
            warranty_months: 24,
        },
        Specification::Grocery {
            net_weight_grams: 250,
            best_before: "2027-01-31".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_has_five_products() {
        let (catalog, keys) = demo_catalog();

        assert_eq!(catalog.len(), 5);
        assert_eq!(keys.len(), 5);

        for key in keys {
            assert!(catalog.get(key).is_some(), "key should resolve");
        }
    }

    #[test]
    fn demo_session_has_a_default_address() {
        let session = demo_session();

        let (_, entry) = session
            .addresses
            .default_entry()
            .expect("a default address should exist");

        assert_eq!(entry.zip_code, "400001");
    }

    #[test]
    fn demo_specifications_validate() {
        for spec in demo_specifications() {
            assert_eq!(spec.validate(), Ok(()), "fixture specs should be complete");
        }
    }
}
