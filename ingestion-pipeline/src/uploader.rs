use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use common::{storage::store::StorageManager, utils::slug::slugify};
use mime_guess::from_path;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to store {path}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: object_store::Error,
    },
}

/// Uploads a single local file into a logical folder of the asset store and
/// returns the resulting public URL. Failures stay scoped to the one file.
#[async_trait]
pub trait AssetUploader: Send + Sync {
    async fn upload(&self, local_path: &Path, folder: &str) -> Result<String, UploadError>;
}

/// Production uploader writing through the shared [`StorageManager`].
///
/// Each call creates a fresh remote object named `<uuid>-<slug>.<ext>` under
/// `<namespace>/<folder>/`; identical content is never deduplicated.
pub struct ObjectStoreUploader {
    storage: StorageManager,
    namespace: String,
    public_base: String,
}

impl ObjectStoreUploader {
    pub fn new(storage: StorageManager, namespace: String, public_base: String) -> Self {
        Self {
            storage,
            namespace,
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    fn object_name(local_path: &Path) -> String {
        let stem = local_path
            .file_stem()
            .map(|stem| slugify(&stem.to_string_lossy()))
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| "asset".to_string());

        let uuid = Uuid::new_v4();
        match local_path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => format!("{uuid}-{stem}.{}", ext.to_ascii_lowercase()),
            None => format!("{uuid}-{stem}"),
        }
    }
}

#[async_trait]
impl AssetUploader for ObjectStoreUploader {
    async fn upload(&self, local_path: &Path, folder: &str) -> Result<String, UploadError> {
        let data = tokio::fs::read(local_path)
            .await
            .map_err(|source| UploadError::Read {
                path: local_path.to_path_buf(),
                source,
            })?;

        let content_type = from_path(local_path)
            .first_or(mime::APPLICATION_OCTET_STREAM)
            .to_string();
        let location = format!(
            "{}/{}/{}",
            self.namespace,
            folder,
            Self::object_name(local_path)
        );

        self.storage
            .put_with_content_type(&location, Bytes::from(data), &content_type)
            .await
            .map_err(|source| UploadError::Store {
                path: local_path.to_path_buf(),
                source,
            })?;

        debug!(
            path = %local_path.display(),
            location = %location,
            content_type = %content_type,
            "asset uploaded"
        );

        Ok(format!("{}/{}", self.public_base, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::utils::config::StorageKind;
    use object_store::memory::InMemory;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn memory_uploader() -> (ObjectStoreUploader, StorageManager) {
        let storage = StorageManager::with_backend(Arc::new(InMemory::new()), StorageKind::Memory);
        let uploader = ObjectStoreUploader::new(
            storage.clone(),
            "kirana".into(),
            "https://assets.test/".into(),
        );
        (uploader, storage)
    }

    #[tokio::test]
    async fn upload_stores_object_and_returns_public_url() {
        let (uploader, storage) = memory_uploader();
        let dir = TempDir::new().expect("tempdir");
        let image = dir.path().join("Lays Classic.PNG");
        std::fs::write(&image, b"png bytes").expect("write image");

        let url = uploader.upload(&image, "products").await.expect("upload");

        assert!(url.starts_with("https://assets.test/kirana/products/"));
        assert!(url.ends_with("-Lays-Classic.png"));

        let stored = storage
            .list(Some("kirana/products/"))
            .await
            .expect("list uploaded objects");
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn each_upload_creates_a_distinct_object() {
        let (uploader, storage) = memory_uploader();
        let dir = TempDir::new().expect("tempdir");
        let image = dir.path().join("tomato.jpg");
        std::fs::write(&image, b"same bytes").expect("write image");

        let first = uploader.upload(&image, "products").await.expect("upload");
        let second = uploader.upload(&image, "products").await.expect("upload");
        assert_ne!(first, second, "no dedup by content");

        let stored = storage
            .list(Some("kirana/products/"))
            .await
            .expect("list uploaded objects");
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_surfaces_read_error_with_path() {
        let (uploader, _storage) = memory_uploader();
        let missing = Path::new("/nowhere/missing.png");

        let err = uploader
            .upload(missing, "categories")
            .await
            .expect_err("missing file should fail");

        match err {
            UploadError::Read { path, .. } => assert_eq!(path, missing.to_path_buf()),
            other => panic!("expected read error, got {other}"),
        }
    }
}
