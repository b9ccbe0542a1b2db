use std::collections::HashMap;

use common::{
    error::AppError,
    storage::{
        db::SurrealDbClient,
        types::{category::Category, subcategory::Subcategory},
    },
};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolverError {
    #[error("duplicate category name: {0}")]
    DuplicateCategory(String),
    #[error("duplicate subcategory key: {0}")]
    DuplicateSubcategory(String),
}

impl From<ResolverError> for AppError {
    fn from(err: ResolverError) -> Self {
        AppError::Resolver(err.to_string())
    }
}

/// Persisted identifiers backing one `"category/subcategory"` composite key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryRef {
    pub subcategory_id: String,
    pub category_id: String,
}

/// Run-scoped mapping from directory names to persisted entity ids.
///
/// Built freshly while full ingestion creates records, or loaded from the
/// store before a product-only run. Never persisted.
#[derive(Debug, Default)]
pub struct EntityResolver {
    categories: HashMap<String, String>,
    subcategories: HashMap<String, SubcategoryRef>,
}

impl EntityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn composite_key(category_dir: &str, subcategory_dir: &str) -> String {
        format!("{category_dir}/{subcategory_dir}")
    }

    /// Records a freshly created category. Duplicate names are rejected; a
    /// colliding directory tree is operator error.
    pub fn insert_category(&mut self, name: &str, id: String) -> Result<(), ResolverError> {
        if self.categories.contains_key(name) {
            return Err(ResolverError::DuplicateCategory(name.to_string()));
        }
        self.categories.insert(name.to_string(), id);
        Ok(())
    }

    /// Records a freshly created subcategory under its composite key.
    pub fn insert_subcategory(
        &mut self,
        category_dir: &str,
        subcategory_name: &str,
        subcategory_id: String,
        category_id: String,
    ) -> Result<(), ResolverError> {
        let key = Self::composite_key(category_dir, subcategory_name);
        if self.subcategories.contains_key(&key) {
            return Err(ResolverError::DuplicateSubcategory(key));
        }
        self.subcategories.insert(
            key,
            SubcategoryRef {
                subcategory_id,
                category_id,
            },
        );
        Ok(())
    }

    pub fn resolve_category(&self, name: &str) -> Option<&str> {
        self.categories.get(name).map(String::as_str)
    }

    pub fn resolve_subcategory(
        &self,
        category_dir: &str,
        subcategory_dir: &str,
    ) -> Option<&SubcategoryRef> {
        self.subcategories
            .get(&Self::composite_key(category_dir, subcategory_dir))
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn subcategory_count(&self) -> usize {
        self.subcategories.len()
    }

    /// Builds the maps from already persisted records for a product-only run.
    ///
    /// Subcategories linking to a category id that no loaded category carries
    /// are omitted from the map, with a warning per omission.
    pub async fn load(db: &SurrealDbClient) -> Result<Self, AppError> {
        let categories: Vec<Category> = db.get_all_stored_items().await?;
        let subcategories: Vec<Subcategory> = db.get_all_stored_items().await?;

        let mut resolver = Self::new();

        for category in &categories {
            if resolver
                .categories
                .insert(category.name.clone(), category.id.clone())
                .is_some()
            {
                warn!(
                    category = %category.name,
                    "duplicate category name in store; keeping the last loaded id"
                );
            }
        }

        for subcategory in &subcategories {
            for category_id in &subcategory.category {
                let Some(parent) = categories.iter().find(|c| &c.id == category_id) else {
                    warn!(
                        subcategory = %subcategory.name,
                        category_id = %category_id,
                        "subcategory links to an unknown category id; omitting from resolver"
                    );
                    continue;
                };

                let key = Self::composite_key(&parent.name, &subcategory.name);
                if resolver
                    .subcategories
                    .insert(
                        key.clone(),
                        SubcategoryRef {
                            subcategory_id: subcategory.id.clone(),
                            category_id: category_id.clone(),
                        },
                    )
                    .is_some()
                {
                    warn!(key = %key, "duplicate composite key in store; keeping the last loaded entry");
                }
            }
        }

        Ok(resolver)
    }
}
