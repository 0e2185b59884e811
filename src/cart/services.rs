//! Cart mutations. Each takes the already-resolved user id and the document
//! loaded for the current request.

use tracing::{debug, info, warn};

use crate::{
    cart::repo_types::{Cart, CartItem},
    db::Document,
    error::AppError,
    products::repo_types::Product,
};

/// The user's cart, or an empty one that is not persisted.
pub fn get_cart(doc: &Document, user_id: &str) -> Cart {
    Cart::find(doc, user_id)
        .cloned()
        .unwrap_or_else(|| Cart::empty(user_id))
}

pub fn add_item(
    doc: &mut Document,
    user_id: &str,
    product_id: &str,
    qty: i64,
) -> Result<Cart, AppError> {
    let product = Product::find(doc, product_id).cloned().ok_or_else(|| {
        warn!(%product_id, "add to cart: unknown product");
        AppError::not_found("Product not found")
    })?;

    let cart = Cart::find_or_create(doc, user_id);
    match cart.items.iter().position(|i| i.product_id == product_id) {
        Some(idx) => {
            let item = &mut cart.items[idx];
            item.qty = item.qty.checked_add(qty).ok_or_else(|| {
                warn!(%product_id, qty, "add to cart: quantity overflow");
                AppError::BusinessRule("Quantity too large".into())
            })?;
            if item.qty <= 0 {
                cart.items.remove(idx);
            }
        }
        None if qty > 0 => cart.items.push(CartItem::snapshot(&product, qty)),
        None => debug!(%product_id, qty, "non-positive qty for new item; nothing added"),
    }

    info!(%user_id, %product_id, qty, "added to cart");
    Ok(cart.clone())
}

/// Set an item's quantity; zero or below removes it.
pub fn update_item(
    doc: &mut Document,
    user_id: &str,
    product_id: &str,
    qty: i64,
) -> Result<Cart, AppError> {
    let cart = Cart::find_mut(doc, user_id).ok_or_else(|| AppError::not_found("Cart not found"))?;
    let idx = cart
        .items
        .iter()
        .position(|i| i.product_id == product_id)
        .ok_or_else(|| AppError::not_found("Item not in cart"))?;

    if qty <= 0 {
        cart.items.remove(idx);
    } else {
        cart.items[idx].qty = qty;
    }

    info!(%user_id, %product_id, qty, "cart item updated");
    Ok(cart.clone())
}

/// Remove an item. Removing something that isn't there is not an error.
pub fn remove_item(doc: &mut Document, user_id: &str, product_id: &str) -> Result<Cart, AppError> {
    let cart = Cart::find_mut(doc, user_id).ok_or_else(|| AppError::not_found("Cart not found"))?;
    cart.items.retain(|i| i.product_id != product_id);

    info!(%user_id, %product_id, "cart item removed");
    Ok(cart.clone())
}
