use uuid::Uuid;

use crate::stored_object;

stored_object!(Category, "category", {
    name: String,
    image: String
});

impl Category {
    pub fn new(name: String, image: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            name,
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::db::SurrealDbClient;

    #[test]
    fn new_assigns_id_and_timestamps() {
        let category = Category::new(
            "Snacks".into(),
            "https://assets.test/kirana/categories/snacks.png".into(),
        );
        assert!(!category.id.is_empty());
        assert_eq!(category.name, "Snacks");
        assert_eq!(category.created_at, category.updated_at);
    }

    #[tokio::test]
    async fn round_trips_through_the_store() {
        let db = SurrealDbClient::memory("test_ns", &Uuid::new_v4().to_string())
            .await
            .expect("Failed to start in-memory surrealdb");

        let category = Category::new(
            "Dairy & Breakfast".into(),
            "https://assets.test/kirana/categories/dairy.png".into(),
        );
        db.store_item(category.clone()).await.expect("store");

        let fetched: Option<Category> = db.get_item(&category.id).await.expect("fetch");
        assert_eq!(fetched, Some(category));
    }
}
