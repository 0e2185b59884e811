use serde::Serialize;

use crate::checkout::repo_types::Order;

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub message: String,
    pub order: Order,
}
