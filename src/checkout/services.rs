use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    cart::repo_types::{Cart, CartItem},
    checkout::repo_types::Order,
    db::Document,
    error::AppError,
};

pub const ORDER_ID_PREFIX: &str = "ord_";

/// Σ qty × price, or `None` if it does not fit in an `i64`.
pub fn order_total(items: &[CartItem]) -> Option<i64> {
    items
        .iter()
        .try_fold(0i64, |acc, i| i.qty.checked_mul(i.price)?.checked_add(acc))
}

/// Turn the user's cart into an order and delete the cart record.
pub fn checkout(doc: &mut Document, user_id: &str, now: OffsetDateTime) -> Result<Order, AppError> {
    let items = match Cart::find(doc, user_id) {
        Some(cart) if !cart.items.is_empty() => cart.items.clone(),
        _ => {
            warn!(%user_id, "checkout with empty cart");
            return Err(AppError::BusinessRule("Cart is empty".into()));
        }
    };

    let total = order_total(&items).ok_or_else(|| {
        warn!(%user_id, "checkout total overflow");
        AppError::BusinessRule("Order total too large".into())
    })?;

    let order = Order {
        id: format!("{ORDER_ID_PREFIX}{}", Uuid::new_v4().simple()),
        user_id: user_id.to_string(),
        total,
        items,
        date: now,
    };
    doc.orders.push(order.clone());
    Cart::delete(doc, user_id);

    info!(%user_id, order_id = %order.id, total = order.total, "order placed");
    Ok(order)
}

/// The user's orders, oldest first.
pub fn list_orders(doc: &Document, user_id: &str) -> Vec<Order> {
    doc.orders
        .iter()
        .filter(|o| o.user_id == user_id)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cart::services::{add_item, get_cart, remove_item},
        products::seed::catalog,
    };

    fn doc() -> Document {
        Document {
            products: catalog(),
            ..Document::default()
        }
    }

    #[test]
    fn total_is_sum_of_qty_times_price() {
        let mut d = doc();
        add_item(&mut d, "u1", "p1", 2).unwrap();
        add_item(&mut d, "u1", "p1", 3).unwrap();

        let order = checkout(&mut d, "u1", OffsetDateTime::now_utc()).unwrap();
        assert_eq!(order.total, 149995);
        assert_eq!(order.items.len(), 1);
        assert!(order.id.starts_with(ORDER_ID_PREFIX));
        assert_eq!(d.orders, vec![order]);
    }

    #[test]
    fn mixed_items_total() {
        let mut d = doc();
        add_item(&mut d, "u1", "p2", 1).unwrap();
        add_item(&mut d, "u1", "p3", 4).unwrap();
        let order = checkout(&mut d, "u1", OffsetDateTime::now_utc()).unwrap();
        assert_eq!(order.total, 12999 + 4 * 1999);
    }

    #[test]
    fn total_overflow_is_rejected_and_keeps_the_cart() {
        let mut d = doc();
        add_item(&mut d, "u1", "p1", i64::MAX / 1000).unwrap();

        let err = checkout(&mut d, "u1", OffsetDateTime::now_utc()).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
        assert!(d.orders.is_empty());
        assert!(Cart::find(&d, "u1").is_some());
    }

    #[test]
    fn checkout_deletes_the_cart_record() {
        let mut d = doc();
        add_item(&mut d, "u1", "p1", 1).unwrap();
        add_item(&mut d, "u2", "p2", 1).unwrap();

        checkout(&mut d, "u1", OffsetDateTime::now_utc()).unwrap();

        assert!(Cart::find(&d, "u1").is_none());
        assert_eq!(get_cart(&d, "u1"), Cart::empty("u1"));
        assert!(Cart::find(&d, "u2").is_some());
    }

    #[test]
    fn empty_or_missing_cart_is_rejected_without_an_order() {
        let mut d = doc();
        let err = checkout(&mut d, "u1", OffsetDateTime::now_utc()).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));

        add_item(&mut d, "u1", "p1", 1).unwrap();
        remove_item(&mut d, "u1", "p1").unwrap();
        let err = checkout(&mut d, "u1", OffsetDateTime::now_utc()).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
        assert!(d.orders.is_empty());
    }

    #[test]
    fn order_is_unaffected_by_later_cart_activity() {
        let mut d = doc();
        add_item(&mut d, "u1", "p1", 1).unwrap();
        let order = checkout(&mut d, "u1", OffsetDateTime::now_utc()).unwrap();

        add_item(&mut d, "u1", "p1", 9).unwrap();
        assert_eq!(list_orders(&d, "u1"), vec![order]);
        assert!(list_orders(&d, "u2").is_empty());
    }
}
