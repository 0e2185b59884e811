use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    auth::repo_types::User,
    cart::repo_types::Cart,
    checkout::repo_types::Order,
    products::repo_types::Product,
    storage::{DocumentStore, StoreError},
};

/// The whole persisted state. Collections keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub carts: Vec<Cart>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Access handle over a [`DocumentStore`].
///
/// Every call reloads the document; nothing is cached between requests.
/// Writes go through a single async lock so two load/mutate/save cycles can
/// never interleave and overwrite each other.
#[derive(Clone)]
pub struct Db {
    store: Arc<dyn DocumentStore>,
    write_lock: Arc<Mutex<()>>,
}

impl Db {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Reload the document and run a read-only query against it.
    pub async fn read<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Document) -> Result<T, E>,
        E: From<StoreError>,
    {
        let doc = self.store.load().await?;
        f(&doc)
    }

    /// Reload, mutate and persist the document under the write lock.
    ///
    /// The document is saved only when `f` succeeds, so a rejected operation
    /// leaves the persisted state untouched.
    pub async fn write<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Document) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.store.load().await?;
        let out = f(&mut doc)?;
        self.store.save(&doc).await?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cart::{repo_types::CartItem, services::add_item},
        products::seed::catalog,
        storage::MemoryStore,
    };
    use async_trait::async_trait;

    /// Memory store that yields to the scheduler around every load and save,
    /// giving other tasks a chance to run inside the I/O window.
    struct YieldingStore(MemoryStore);

    #[async_trait]
    impl DocumentStore for YieldingStore {
        async fn load(&self) -> Result<Document, StoreError> {
            tokio::task::yield_now().await;
            let doc = self.0.load().await;
            tokio::task::yield_now().await;
            doc
        }

        async fn save(&self, doc: &Document) -> Result<(), StoreError> {
            tokio::task::yield_now().await;
            self.0.save(doc).await
        }
    }

    fn seeded() -> Document {
        Document {
            products: catalog(),
            ..Document::default()
        }
    }

    fn qty_of(doc: &Document, user_id: &str, product_id: &str) -> i64 {
        doc.carts
            .iter()
            .find(|c| c.user_id == user_id)
            .and_then(|c| c.items.iter().find(|i| i.product_id == product_id))
            .map(|i: &CartItem| i.qty)
            .unwrap_or(0)
    }

    #[tokio::test]
    async fn unserialized_load_save_loses_an_update() {
        let store = MemoryStore::with_document(&seeded()).unwrap();

        // Two requests both load before either saves
        let mut first = store.load().await.unwrap();
        let mut second = store.load().await.unwrap();

        add_item(&mut first, "u1", "p1", 2).unwrap();
        add_item(&mut second, "u1", "p1", 3).unwrap();

        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        let doc = store.load().await.unwrap();
        assert_eq!(qty_of(&doc, "u1", "p1"), 3, "first add was overwritten");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn serialized_writes_keep_every_update() {
        let db = Db::new(Arc::new(YieldingStore(
            MemoryStore::with_document(&seeded()).unwrap(),
        )));

        let mut handles = Vec::new();
        for _ in 0..25 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                db.write(|doc| add_item(doc, "u1", "p1", 1).map(|_| ()))
                    .await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let doc: Document = db
            .read(|doc| Ok::<_, StoreError>(doc.clone()))
            .await
            .unwrap();
        assert_eq!(qty_of(&doc, "u1", "p1"), 25);
        assert_eq!(doc.carts.len(), 1);
    }

    #[tokio::test]
    async fn failed_write_persists_nothing() {
        let db = Db::new(Arc::new(MemoryStore::with_document(&seeded()).unwrap()));

        let res: Result<(), crate::error::AppError> = db
            .write(|doc| {
                doc.products.clear();
                Err(crate::error::AppError::BusinessRule("nope".into()))
            })
            .await;
        assert!(res.is_err());

        let count = db
            .read(|doc| Ok::<_, StoreError>(doc.products.len()))
            .await
            .unwrap();
        assert_eq!(count, 5);
    }
}
