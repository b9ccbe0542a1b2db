use uuid::Uuid;

use crate::stored_object;

stored_object!(Subcategory, "subcategory", {
    name: String,
    image: String,
    category: Vec<String>
});

impl Subcategory {
    pub fn new(name: String, image: String, category_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            name,
            image,
            category: vec![category_id],
        }
    }
}
