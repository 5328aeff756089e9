mod local;
mod remote;

use async_trait::async_trait;
use axum::body::Bytes;
use storage::dto::common::ImageRef;
use storage::services::best_effort;
use thiserror::Error;

pub use local::{LocalBlobStore, UPLOADS_ROUTE};
pub use remote::RemoteBlobStore;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Blob store responded with status {0}")]
    Status(u16),

    #[error("Invalid blob id: {0}")]
    InvalidId(String),
}

/// An uploaded file held in memory.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub bytes: Bytes,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl UploadFile {
    /// Declared content type, falling back to a guess from the file name.
    pub fn mime(&self) -> Option<String> {
        self.content_type.clone().or_else(|| {
            self.file_name
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first())
                .map(|m| m.to_string())
        })
    }

    pub fn is_image(&self) -> bool {
        self.mime().is_some_and(|m| m.starts_with("image/"))
    }

    /// Lowercase extension of the original file name, if it has a sane one.
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name.as_deref()?;
        let (_, ext) = name.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        (!ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .then_some(ext)
    }
}

/// Hosted file storage for category and news images.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the file under `folder` and return its public URL and id.
    async fn upload(&self, file: &UploadFile, folder: &str) -> Result<ImageRef, BlobError>;

    /// Remove a previously uploaded file by id.
    async fn delete(&self, id: &str) -> Result<(), BlobError>;
}

/// Upload an optional file; nothing to do when no file was sent.
pub async fn upload_optional(
    store: &dyn BlobStore,
    file: Option<&UploadFile>,
    folder: &str,
) -> Result<Option<ImageRef>, BlobError> {
    match file {
        Some(file) => Ok(Some(store.upload(file, folder).await?)),
        None => Ok(None),
    }
}

/// Delete a blob if there is one, logging instead of failing.
pub async fn release(store: &dyn BlobStore, id: Option<&str>) {
    if let Some(id) = id {
        best_effort("delete blob", store.delete(id)).await;
    }
}

/// Await the database write that references `fresh` uploads. On failure the
/// fresh blobs are orphans and get released; on success the `replaced` ones do.
pub async fn commit_uploads<T, E>(
    store: &dyn BlobStore,
    fresh: &[&str],
    replaced: &[&str],
    write: impl Future<Output = Result<T, E>>,
) -> Result<T, E> {
    let (result, orphans) = match write.await {
        Ok(value) => (Ok(value), replaced),
        Err(e) => (Err(e), fresh),
    };

    for id in orphans {
        release(store, Some(id)).await;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: Option<&str>, content_type: Option<&str>) -> UploadFile {
        UploadFile {
            bytes: Bytes::from_static(b"data"),
            file_name: name.map(str::to_string),
            content_type: content_type.map(str::to_string),
        }
    }

    #[test]
    fn test_image_detection() {
        assert!(file(Some("a.png"), Some("image/png")).is_image());
        assert!(file(Some("banner.JPG"), None).is_image());
        assert!(!file(Some("notes.pdf"), Some("application/pdf")).is_image());
        assert!(!file(None, None).is_image());
    }

    #[test]
    fn test_extension() {
        assert_eq!(file(Some("Card.PNG"), None).extension().as_deref(), Some("png"));
        assert_eq!(file(Some("archive"), None).extension(), None);
        assert_eq!(file(Some("x.../etc"), None).extension(), None);
    }

    struct Recorder {
        deleted: std::sync::Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl BlobStore for Recorder {
        async fn upload(&self, _file: &UploadFile, folder: &str) -> Result<ImageRef, BlobError> {
            Ok(ImageRef {
                url: format!("http://blobs/{folder}/x"),
                id: format!("{folder}/x"),
            })
        }

        async fn delete(&self, id: &str) -> Result<(), BlobError> {
            self.deleted.lock().unwrap().push(id.to_string());
            if self.fail {
                return Err(BlobError::Status(500));
            }
            Ok(())
        }
    }

    fn recorder(fail: bool) -> Recorder {
        Recorder {
            deleted: std::sync::Mutex::new(Vec::new()),
            fail,
        }
    }

    #[tokio::test]
    async fn test_upload_optional() {
        let store = recorder(false);

        assert_eq!(upload_optional(&store, None, "news").await.unwrap(), None);

        let image = file(Some("a.png"), None);
        let uploaded = upload_optional(&store, Some(&image), "news").await.unwrap();
        assert_eq!(uploaded.unwrap().id, "news/x");
    }

    #[tokio::test]
    async fn test_release_swallows_failures() {
        let store = recorder(true);

        release(&store, None).await;
        release(&store, Some("news/old.png")).await;

        assert_eq!(*store.deleted.lock().unwrap(), vec!["news/old.png".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_write_releases_fresh_uploads() {
        let store = recorder(false);

        let result: Result<(), &str> = commit_uploads(
            &store,
            &["card-images/new.png", "banner-images/new.png"],
            &["card-images/old.png"],
            async { Err("update failed") },
        )
        .await;

        assert_eq!(result, Err("update failed"));
        assert_eq!(
            *store.deleted.lock().unwrap(),
            vec!["card-images/new.png".to_string(), "banner-images/new.png".to_string()]
        );
    }

    #[tokio::test]
    async fn test_successful_write_releases_replaced_blobs() {
        let store = recorder(false);

        let result: Result<u8, &str> =
            commit_uploads(&store, &["news/new.png"], &["news/old.png"], async { Ok(1) }).await;

        assert_eq!(result, Ok(1));
        assert_eq!(*store.deleted.lock().unwrap(), vec!["news/old.png".to_string()]);
    }
}
