use serde::{Deserialize, Serialize};

/// Catalog entry. Read-only at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub category: String, // free-form tag
    pub price: i64,       // smallest currency unit
    pub image: String,
    pub rating: f64,
}
