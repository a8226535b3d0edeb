//! Product Specifications
//!
//! Per-type specification sheets. Each product type is a variant carrying only
//! its own fields, so a specification can never hold fields that do not apply
//! to its type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating a specification sheet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecificationError {
    /// One or more required fields of the variant are missing.
    #[error("{product_type} specification is missing: {}", .fields.join(", "))]
    MissingFields {
        /// The product type the specification describes.
        product_type: &'static str,

        /// Names of the fields that were empty.
        fields: Vec<&'static str>,
    },
}

/// A specification sheet for a single product, keyed by product type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Specification {
    /// Apparel: sizing and fabric details.
    Apparel {
        /// Garment size label
        size: String,

        /// Fabric composition
        fabric: String,
    },

    /// Electronics: manufacturer details and warranty.
    Electronics {
        /// Brand name
        brand: String,

        /// Model designation
        model: String,

        /// Warranty period in months
        warranty_months: u32,
    },

    /// Groceries: weight and shelf-life details.
    Grocery {
        /// Net weight in grams
        net_weight_grams: u32,

        /// Best-before date, as printed
        best_before: String,
    },

    /// Books: bibliographic details.
    Book {
        /// Author name
        author: String,

        /// ISBN identifier
        isbn: String,
    },
}

impl Specification {
    /// The product type this specification describes.
    #[must_use]
    pub fn product_type(&self) -> &'static str {
        match self {
            Specification::Apparel { .. } => "apparel",
            Specification::Electronics { .. } => "electronics",
            Specification::Grocery { .. } => "grocery",
            Specification::Book { .. } => "book",
        }
    }

    /// Validate that every field required by this variant is present.
    ///
    /// # Errors
    ///
    /// Returns [`SpecificationError::MissingFields`] naming each empty field.
    pub fn validate(&self) -> Result<(), SpecificationError> {
        let mut missing = Vec::new();

        match self {
            Specification::Apparel { size, fabric } => {
                require(&mut missing, "size", size);
                require(&mut missing, "fabric", fabric);
            }
            Specification::Electronics { brand, model, .. } => {
                require(&mut missing, "brand", brand);
                require(&mut missing, "model", model);
            }
            Specification::Grocery {
                net_weight_grams,
                best_before,
            } => {
                if *net_weight_grams == 0 {
                    missing.push("net_weight_grams");
                }

                require(&mut missing, "best_before", best_before);
            }
            Specification::Book { author, isbn } => {
                require(&mut missing, "author", author);
                require(&mut missing, "isbn", isbn);
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SpecificationError::MissingFields {
                product_type: self.product_type(),
                fields: missing,
            })
        }
    }
}

/// Record the field name if its value is blank.
fn require(missing: &mut Vec<&'static str>, name: &'static str, value: &str) {
    if value.trim().is_empty() {
        missing.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_apparel_specification_validates() {
        let spec = Specification::Apparel {
            size: "M".to_string(),
            fabric: "cotton".to_string(),
        };

        assert_eq!(spec.validate(), Ok(()));
    }

    #[test]
    fn blank_fields_are_reported_by_name() {
        let spec = Specification::Electronics {
            brand: String::new(),
            model: "  ".to_string(),
            warranty_months: 12,
        };

        let err = spec.validate().err();

        assert_eq!(
            err,
            Some(SpecificationError::MissingFields {
                product_type: "electronics",
                fields: vec!["brand", "model"],
            })
        );
    }

    #[test]
    fn zero_weight_grocery_is_incomplete() {
        let spec = Specification::Grocery {
            net_weight_grams: 0,
            best_before: "2026-12-01".to_string(),
        };

        assert_eq!(
            spec.validate(),
            Err(SpecificationError::MissingFields {
                product_type: "grocery",
                fields: vec!["net_weight_grams"],
            })
        );
    }

    #[test]
    fn warranty_months_is_not_required() {
        let spec = Specification::Electronics {
            brand: "Volta".to_string(),
            model: "VK-2".to_string(),
            warranty_months: 0,
        };

        assert_eq!(spec.validate(), Ok(()));
    }

    #[test]
    fn product_type_matches_variant() {
        let spec = Specification::Book {
            author: "A. Writer".to_string(),
            isbn: "978-0000000000".to_string(),
        };

        assert_eq!(spec.product_type(), "book");
    }
}
