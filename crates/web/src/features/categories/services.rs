use sqlx::PgPool;
use storage::{
    dto::category::{CategoryImages, CreateCategoryRequest, UpdateCategoryRequest},
    error::Result,
    models::Category,
    repository::CategoryRepository,
};
use uuid::Uuid;

use crate::blob::{self, UploadFile};
use crate::error::WebResult;
use crate::state::AppState;

pub const CARD_IMAGES_FOLDER: &str = "card-images";
pub const BANNER_IMAGES_FOLDER: &str = "banner-images";

/// Image files sent with a category form.
#[derive(Debug, Default)]
pub struct CategoryUploads {
    pub card: Option<UploadFile>,
    pub banner: Option<UploadFile>,
}

pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>> {
    CategoryRepository::new(pool).list().await
}

pub async fn get_category(pool: &PgPool, id: Uuid) -> Result<Category> {
    CategoryRepository::new(pool).find_by_id(id).await
}

pub async fn create_category(
    state: &AppState,
    req: &CreateCategoryRequest,
    uploads: CategoryUploads,
) -> WebResult<Category> {
    let images = upload_images(state, &uploads).await?;
    let categories = CategoryRepository::new(state.db.pool());

    let category = blob::commit_uploads(
        state.blobs.as_ref(),
        &images.ids(),
        &[],
        categories.create(req, &images),
    )
    .await?;

    Ok(category)
}

/// Merge the form into the category. A replaced image's old blob is deleted
/// once the row points at the new one.
pub async fn update_category(
    state: &AppState,
    id: Uuid,
    req: &UpdateCategoryRequest,
    uploads: CategoryUploads,
) -> WebResult<Category> {
    let categories = CategoryRepository::new(state.db.pool());
    let existing = categories.find_by_id(id).await?;

    let images = upload_images(state, &uploads).await?;

    let mut replaced = Vec::new();
    if images.card.is_some() {
        replaced.extend(existing.card_image_id.as_deref());
    }
    if images.banner.is_some() {
        replaced.extend(existing.banner_image_id.as_deref());
    }

    let category = blob::commit_uploads(
        state.blobs.as_ref(),
        &images.ids(),
        &replaced,
        categories.update(id, req, &images),
    )
    .await?;

    Ok(category)
}

/// Release both images, then remove the row
pub async fn delete_category(state: &AppState, id: Uuid) -> WebResult<Category> {
    let categories = CategoryRepository::new(state.db.pool());
    let existing = categories.find_by_id(id).await?;

    blob::release(state.blobs.as_ref(), existing.card_image_id.as_deref()).await;
    blob::release(state.blobs.as_ref(), existing.banner_image_id.as_deref()).await;

    Ok(categories.delete(id).await?)
}

async fn upload_images(state: &AppState, uploads: &CategoryUploads) -> WebResult<CategoryImages> {
    let store = state.blobs.as_ref();

    let card = blob::upload_optional(store, uploads.card.as_ref(), CARD_IMAGES_FOLDER).await?;
    let banner = match blob::upload_optional(store, uploads.banner.as_ref(), BANNER_IMAGES_FOLDER).await {
        Ok(banner) => banner,
        Err(e) => {
            blob::release(store, card.as_ref().map(|i| i.id.as_str())).await;
            return Err(e.into());
        }
    };

    Ok(CategoryImages { card, banner })
}
