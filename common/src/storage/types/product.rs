use uuid::Uuid;

use crate::stored_object;

stored_object!(Product, "product", {
    name: String,
    image: Vec<String>,
    category: Vec<String>,
    subcategory: Vec<String>,
    price: u32,
    unit: String,
    stock: u32,
    discount: u32,
    description: String
});

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        image: Vec<String>,
        category_id: String,
        subcategory_id: String,
        price: u32,
        unit: String,
        stock: u32,
        discount: u32,
        description: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            name,
            image,
            category: vec![category_id],
            subcategory: vec![subcategory_id],
            price,
            unit,
            stock,
            discount,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::db::SurrealDbClient;

    fn sample_product() -> Product {
        Product::new(
            "LaysClassic".into(),
            vec![
                "https://assets.test/kirana/products/lays-1.png".into(),
                "https://assets.test/kirana/products/lays-2.png".into(),
            ],
            "category-1".into(),
            "subcategory-1".into(),
            20,
            "50g".into(),
            200,
            0,
            "Classic salted chips".into(),
        )
    }

    #[test]
    fn new_links_both_parents() {
        let product = sample_product();
        assert_eq!(product.category, vec!["category-1".to_string()]);
        assert_eq!(product.subcategory, vec!["subcategory-1".to_string()]);
        assert_eq!(product.image.len(), 2);
    }

    #[tokio::test]
    async fn round_trips_through_the_store() {
        let db = SurrealDbClient::memory("test_ns", &Uuid::new_v4().to_string())
            .await
            .expect("Failed to start in-memory surrealdb");

        let product = sample_product();
        db.store_item(product.clone()).await.expect("store");

        let fetched: Option<Product> = db.get_item(&product.id).await.expect("fetch");
        assert_eq!(fetched, Some(product));
    }
}
