use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::ImageRef;

/// Text fields of a category form. Images travel alongside as file parts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub lead_id: Option<Uuid>,

    pub co_lead_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub lead_id: Option<Uuid>,

    pub co_lead_id: Option<Uuid>,
}

/// Images to persist on a category. `None` leaves the stored image untouched.
#[derive(Debug, Clone, Default)]
pub struct CategoryImages {
    pub card: Option<ImageRef>,
    pub banner: Option<ImageRef>,
}

impl CategoryImages {
    /// Blob ids of the images present.
    pub fn ids(&self) -> Vec<&str> {
        [&self.card, &self.banner]
            .into_iter()
            .flatten()
            .map(|image| image.id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_ids() {
        let images = CategoryImages {
            card: None,
            banner: Some(ImageRef {
                url: "http://localhost:3000/uploads/banner-images/b.png".into(),
                id: "banner-images/b.png".into(),
            }),
        };
        assert_eq!(images.ids(), vec!["banner-images/b.png"]);
        assert!(CategoryImages::default().ids().is_empty());
    }
}
