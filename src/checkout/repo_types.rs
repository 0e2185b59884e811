use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::cart::repo_types::CartItem;

/// Immutable record of a checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String, // "ord_" + uuid
    pub user_id: String,
    pub items: Vec<CartItem>, // frozen copy of the cart
    pub total: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}
