use tracing::info;

use crate::{db::Db, error::AppError, products::repo_types::Product};

fn product(id: &str, title: &str, category: &str, price: i64, rating: f64) -> Product {
    Product {
        id: id.into(),
        title: title.into(),
        category: category.into(),
        price,
        image: format!("https://picsum.photos/seed/{id}/400/400"),
        rating,
    }
}

/// The sample catalog written on first start.
pub fn catalog() -> Vec<Product> {
    vec![
        product("p1", "Wireless Noise-Cancelling Headphones", "electronics", 29999, 4.6),
        product("p2", "Mechanical Keyboard", "electronics", 12999, 4.4),
        product("p3", "Cotton Crewneck T-Shirt", "clothing", 1999, 4.1),
        product("p4", "Stainless Steel Water Bottle", "home", 2499, 4.7),
        product("p5", "Trail Running Shoes", "clothing", 8999, 4.3),
    ]
}

/// Populate the catalog if it is empty. Returns whether anything was written.
pub async fn seed_catalog(db: &Db) -> Result<bool, AppError> {
    let seeded = db
        .write(|doc| {
            if !doc.products.is_empty() {
                return Ok::<_, AppError>(false);
            }
            doc.products = catalog();
            Ok(true)
        })
        .await?;

    if seeded {
        info!(count = catalog().len(), "seeded product catalog");
    }
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::{collections::HashSet, sync::Arc};

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<_> = catalog().into_iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    async fn seeding_runs_once() {
        let db = Db::new(Arc::new(MemoryStore::new()));
        assert!(seed_catalog(&db).await.unwrap());
        assert!(!seed_catalog(&db).await.unwrap());

        let count = db
            .read(|doc| Ok::<_, AppError>(doc.products.len()))
            .await
            .unwrap();
        assert_eq!(count, 5);
    }
}
