use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;

use crate::blob::UploadFile;
use crate::error::WebError;

/// A multipart form read fully into memory: text fields plus the file parts
/// the caller asked for.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadFile>,
}

impl MultipartForm {
    /// Read every part. Parts named in `file_fields` are kept as files; empty
    /// file parts (a form submitted without choosing a file) are dropped.
    pub async fn read(mut multipart: Multipart, file_fields: &[&str]) -> Result<Self, WebError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| WebError::BadRequest(format!("Multipart error: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if file_fields.contains(&name.as_str()) {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| WebError::BadRequest(format!("Failed to read {name}: {e}")))?;

                if !bytes.is_empty() {
                    form.files.insert(
                        name,
                        UploadFile {
                            bytes,
                            file_name,
                            content_type,
                        },
                    );
                }
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| WebError::BadRequest(format!("Failed to read {name}: {e}")))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Trimmed text value; blank counts as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Parsed text value; blank counts as absent, unparsable is a 400.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, WebError> {
        self.text(name)
            .map(|v| {
                v.parse()
                    .map_err(|_| WebError::BadRequest(format!("{name} has an invalid value")))
            })
            .transpose()
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadFile> {
        self.files.remove(name)
    }

    /// Like [`Self::take_file`] but the file must be an image.
    pub fn take_image(&mut self, name: &str) -> Result<Option<UploadFile>, WebError> {
        match self.take_file(name) {
            Some(file) if !file.is_image() => Err(WebError::BadRequest(format!(
                "{name} must be an image file"
            ))),
            other => Ok(other),
        }
    }

    #[cfg(test)]
    pub fn from_parts(fields: &[(&str, &str)], files: Vec<(&str, UploadFile)>) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: files
                .into_iter()
                .map(|(k, f)| (k.to_string(), f))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use uuid::Uuid;

    fn upload(name: &str, content_type: &str) -> UploadFile {
        UploadFile {
            bytes: Bytes::from_static(b"bytes"),
            file_name: Some(name.into()),
            content_type: Some(content_type.into()),
        }
    }

    #[test]
    fn test_text_is_trimmed_and_blank_is_absent() {
        let form = MultipartForm::from_parts(&[("title", "  Chess "), ("description", "   ")], vec![]);

        assert_eq!(form.text("title").as_deref(), Some("Chess"));
        assert_eq!(form.text("description"), None);
        assert_eq!(form.text("missing"), None);
    }

    #[test]
    fn test_parse_uuid_fields() {
        let id = Uuid::new_v4();
        let id_text = id.to_string();
        let form = MultipartForm::from_parts(
            &[("lead_id", id_text.as_str()), ("co_lead_id", "nope"), ("empty", "")],
            vec![],
        );

        assert_eq!(form.parse::<Uuid>("lead_id").unwrap(), Some(id));
        assert!(form.parse::<Uuid>("co_lead_id").is_err());
        assert_eq!(form.parse::<Uuid>("empty").unwrap(), None);
    }

    #[test]
    fn test_take_image_checks_content_type() {
        let mut form = MultipartForm::from_parts(
            &[],
            vec![
                ("image", upload("photo.jpg", "image/jpeg")),
                ("card_image", upload("doc.pdf", "application/pdf")),
            ],
        );

        assert!(form.take_image("image").unwrap().is_some());
        assert!(form.take_image("image").unwrap().is_none());
        assert!(form.take_image("card_image").is_err());
    }
}
