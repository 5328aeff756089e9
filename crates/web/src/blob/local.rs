use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use storage::dto::common::ImageRef;
use tokio::fs;
use uuid::Uuid;

use super::{BlobError, BlobStore, UploadFile};

/// Public URL prefix under which the server exposes the upload directory.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Filesystem-backed blob store. Files are laid out as `{root}/{folder}/{uuid}.{ext}`
/// and the blob id is the path relative to `root`.
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub async fn new(root: PathBuf, public_base_url: &str) -> Result<Self, BlobError> {
        fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an id to a path inside `root`, rejecting anything that could escape it.
    fn blob_path(&self, id: &str) -> Result<PathBuf, BlobError> {
        let relative = Path::new(id);
        let safe = !id.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !safe {
            return Err(BlobError::InvalidId(id.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, file: &UploadFile, folder: &str) -> Result<ImageRef, BlobError> {
        let name = match file.extension() {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let id = format!("{folder}/{name}");
        let path = self.blob_path(&id)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, &file.bytes).await?;

        tracing::debug!(id, size = file.bytes.len(), "Stored blob");

        Ok(ImageRef {
            url: format!("{}{}/{}", self.public_base_url, UPLOADS_ROUTE, id),
            id,
        })
    }

    async fn delete(&self, id: &str) -> Result<(), BlobError> {
        let path = self.blob_path(id)?;
        fs::remove_file(&path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    fn png() -> UploadFile {
        UploadFile {
            bytes: Bytes::from_static(b"\x89PNG fake"),
            file_name: Some("card.png".into()),
            content_type: Some("image/png".into()),
        }
    }

    #[tokio::test]
    async fn test_upload_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_path_buf(), "http://localhost:8080/")
            .await
            .unwrap();

        let image = store.upload(&png(), "card-images").await.unwrap();

        assert!(image.id.starts_with("card-images/"));
        assert!(image.id.ends_with(".png"));
        assert_eq!(
            image.url,
            format!("http://localhost:8080/uploads/{}", image.id)
        );
        let stored = std::fs::read(dir.path().join(&image.id)).unwrap();
        assert_eq!(stored, b"\x89PNG fake");

        store.delete(&image.id).await.unwrap();
        assert!(!dir.path().join(&image.id).exists());
    }

    #[tokio::test]
    async fn test_delete_missing_blob_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_path_buf(), "http://localhost")
            .await
            .unwrap();

        assert!(matches!(
            store.delete("news/missing.png").await,
            Err(BlobError::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_traversal_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_path_buf(), "http://localhost")
            .await
            .unwrap();

        for id in ["../secret", "/etc/passwd", "news/../../x", ""] {
            assert!(matches!(
                store.delete(id).await,
                Err(BlobError::InvalidId(_))
            ));
        }
    }
}
