use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use storage::dto::common::ImageRef;

use super::{BlobError, BlobStore, UploadFile};

/// Client for an HTTP image-hosting service.
///
/// Uploads are `POST {base}/upload` with multipart fields `file` and `folder`,
/// answered with `{ "url": ..., "id": ... }`. Deletes are `DELETE {base}/files/{id}`.
pub struct RemoteBlobStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RemoteBlobStore {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl BlobStore for RemoteBlobStore {
    async fn upload(&self, file: &UploadFile, folder: &str) -> Result<ImageRef, BlobError> {
        let mut part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone().unwrap_or_else(|| "upload".to_string()));
        if let Some(mime) = file.mime() {
            part = part.mime_str(&mime)?;
        }

        let form = Form::new()
            .text("folder", folder.to_string())
            .part("file", part);

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BlobError::Status(response.status().as_u16()));
        }

        Ok(response.json::<ImageRef>().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), BlobError> {
        let response = self
            .client
            .delete(format!("{}/files/{}", self.base_url, id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BlobError::Status(response.status().as_u16()));
        }

        Ok(())
    }
}
