use serde::{Deserialize, Serialize};

use crate::products::repo_types::Product;

/// One cart per user, created on first add and deleted at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: String,
    pub items: Vec<CartItem>,
}

impl Cart {
    /// The value returned to a user who has no cart record.
    pub fn empty(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            items: Vec::new(),
        }
    }
}

/// Line item. `title`, `price` and `image` are copied from the product when
/// the item is first added and never refreshed. `qty` is always positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub title: String,
    pub price: i64,
    pub image: String,
    pub qty: i64,
}

impl CartItem {
    pub fn snapshot(product: &Product, qty: i64) -> Self {
        Self {
            product_id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            qty,
        }
    }
}
