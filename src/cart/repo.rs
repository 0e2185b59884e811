use crate::{cart::repo_types::Cart, db::Document};

impl Cart {
    pub fn find<'a>(doc: &'a Document, user_id: &str) -> Option<&'a Cart> {
        doc.carts.iter().find(|c| c.user_id == user_id)
    }

    pub fn find_mut<'a>(doc: &'a mut Document, user_id: &str) -> Option<&'a mut Cart> {
        doc.carts.iter_mut().find(|c| c.user_id == user_id)
    }

    /// Lookup-before-insert keeps at most one cart per user.
    pub fn find_or_create<'a>(doc: &'a mut Document, user_id: &str) -> &'a mut Cart {
        let idx = match doc.carts.iter().position(|c| c.user_id == user_id) {
            Some(idx) => idx,
            None => {
                doc.carts.push(Cart::empty(user_id));
                doc.carts.len() - 1
            }
        };
        &mut doc.carts[idx]
    }

    /// Drop the user's cart record entirely.
    pub fn delete(doc: &mut Document, user_id: &str) {
        doc.carts.retain(|c| c.user_id != user_id);
    }
}
