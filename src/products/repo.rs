use crate::{db::Document, products::repo_types::Product};

impl Product {
    /// All products, or only those whose category matches exactly.
    pub fn list(doc: &Document, category: Option<&str>) -> Vec<Product> {
        doc.products
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .cloned()
            .collect()
    }

    pub fn find<'a>(doc: &'a Document, id: &str) -> Option<&'a Product> {
        doc.products.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::seed::catalog;

    fn doc() -> Document {
        Document {
            products: catalog(),
            ..Document::default()
        }
    }

    #[test]
    fn no_filter_returns_everything_in_order() {
        let ids: Vec<_> = Product::list(&doc(), None)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, ["p1", "p2", "p3", "p4", "p5"]);
    }

    #[test]
    fn category_filter_is_exact_and_case_sensitive() {
        let d = doc();
        let electronics = Product::list(&d, Some("electronics"));
        assert!(!electronics.is_empty());
        assert!(electronics.iter().all(|p| p.category == "electronics"));

        assert!(Product::list(&d, Some("Electronics")).is_empty());
        assert!(Product::list(&d, Some("electro")).is_empty());
    }

    #[test]
    fn find_by_id() {
        let d = doc();
        assert_eq!(Product::find(&d, "p1").map(|p| p.price), Some(29999));
        assert!(Product::find(&d, "p404").is_none());
    }
}
