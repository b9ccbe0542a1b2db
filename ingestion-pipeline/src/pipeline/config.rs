use std::path::{Path, PathBuf};

/// Every persisted product carries at most this many image URLs.
pub const DEFAULT_MAX_IMAGES_PER_PRODUCT: usize = 5;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory of category image files; the file stem names the category.
    pub categories_dir: PathBuf,
    /// Directory of per-category subdirectories holding subcategory images.
    pub subcategories_dir: PathBuf,
    /// Root of the `category/subcategory/product` tree of product images.
    pub products_dir: PathBuf,
    pub max_images_per_product: usize,
    /// Fixed seed for attribute synthesis; `None` seeds from entropy.
    pub synthesizer_seed: Option<u64>,
}

impl PipelineConfig {
    /// Derives the conventional layout under a single assets root.
    pub fn from_assets_dir(assets_dir: &Path) -> Self {
        Self {
            categories_dir: assets_dir.join("category"),
            subcategories_dir: assets_dir.join("subcategory"),
            products_dir: assets_dir.join("product"),
            max_images_per_product: DEFAULT_MAX_IMAGES_PER_PRODUCT,
            synthesizer_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_root_expands_to_the_conventional_layout() {
        let config = PipelineConfig::from_assets_dir(Path::new("/srv/assets"));
        assert_eq!(config.categories_dir, PathBuf::from("/srv/assets/category"));
        assert_eq!(
            config.subcategories_dir,
            PathBuf::from("/srv/assets/subcategory")
        );
        assert_eq!(config.products_dir, PathBuf::from("/srv/assets/product"));
        assert_eq!(config.max_images_per_product, 5);
        assert!(config.synthesizer_seed.is_none());
    }
}
