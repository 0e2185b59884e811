use serde::{Deserialize, Serialize};

use crate::cart::repo_types::Cart;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub qty: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub message: String,
    pub cart: Cart,
}

impl CartResponse {
    pub fn new(message: &str, cart: Cart) -> Self {
        Self {
            message: message.to_string(),
            cart,
        }
    }
}
