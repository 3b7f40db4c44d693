use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PizzaSize;

/// Core catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pizza {
    /// 0 until the repository assigns an id on create; non-zero and unique
    /// within the catalog afterwards.
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub size: PizzaSize,
    pub price: Decimal,
    #[serde(default)]
    pub is_gluten_free: bool,
}

impl Pizza {
    /// Create a catalog record that has not been persisted yet
    pub fn new(name: impl Into<String>, size: PizzaSize, price: Decimal) -> Self {
        Self {
            id: 0,
            name: name.into(),
            size,
            price,
            is_gluten_free: false,
        }
    }

    /// Set the gluten-free flag, consuming and returning the record
    pub fn gluten_free(mut self, is_gluten_free: bool) -> Self {
        self.is_gluten_free = is_gluten_free;
        self
    }

    /// A pizza counts as persisted once a repository has assigned its id
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}
