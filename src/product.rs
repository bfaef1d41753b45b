//! # Product Model
//!
//! The single entity managed by the catalog, plus the draft carried by the
//! add and edit commands.

use serde::{Deserialize, Serialize};

/// A catalog record as persisted in the products file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
}

/// The mutable fields of a product, always supplied together
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            description: description.into(),
        }
    }

    /// Materialize the draft as a record with the given id
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
        }
    }
}

impl Product {
    /// Overwrite every mutable field with the draft's values
    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.price = draft.price;
        self.description = draft.description;
    }
}

/// Next id for a new record: one more than the current maximum, 1 when empty.
/// `None` once the maximum is `i64::MAX`.
pub fn next_product_id(products: &[Product]) -> Option<i64> {
    match products.iter().map(|p| p.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
