//! Product listing model for category-scoped navigation targets.
//!
//! Only the summary fields a listing needs are decoded; image and timestamp
//! fields are ignored.

use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};

/// Product primary key.
pub type ProductId = i64;

/// Category reference embedded in product payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    #[serde(default)]
    pub name: String,
}

/// One product as listed by `GET /products/products/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    /// Decimal price kept as the backend's string rendering, e.g. `"19.99"`.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
}

impl ProductSummary {
    pub fn in_stock(&self) -> bool {
        self.available && self.stock > 0
    }

    pub fn belongs_to(&self, category: CategoryId) -> bool {
        self.categories.iter().any(|item| item.id == category)
    }
}
