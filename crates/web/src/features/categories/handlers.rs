use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::category::{CreateCategoryRequest, UpdateCategoryRequest},
    dto::common::{MessageResponse, SuccessResponse},
    models::Category,
};
use uuid::Uuid;
use validator::Validate;

use crate::extract::AppPath;
use crate::error::{ErrorBody, WebError};
use crate::multipart::MultipartForm;
use crate::state::AppState;

use super::services::{self, CategoryUploads};

const IMAGE_FIELDS: &[&str] = &["card_image", "banner_image"];

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories, wrapped as { success, data }", body = Vec<Category>)
    ),
    tag = "categories"
)]
pub async fn list_categories(State(db): State<Database>) -> Result<Response, WebError> {
    let categories = services::list_categories(db.pool()).await?;

    Ok(Json(SuccessResponse::new(categories)).into_response())
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category, wrapped as { success, data }", body = Category),
        (status = 404, description = "Category not found", body = ErrorBody)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let category = services::get_category(db.pool(), id).await?;

    Ok(Json(SuccessResponse::new(category)).into_response())
}

#[utoipa::path(
    post,
    path = "/categories",
    request_body(content = CreateCategoryRequest, content_type = "multipart/form-data",
        description = "Text fields plus optional card_image and banner_image files"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Category created, wrapped as { message, data }", body = Category),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let mut form = MultipartForm::read(multipart, IMAGE_FIELDS).await?;
    let req = create_request(&form)?;
    req.validate()?;
    let uploads = uploads(&mut form)?;

    let category = services::create_category(&state, &req, uploads).await?;
    tracing::info!(category_id = %category.category_id, title = %category.title, "Category created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Category created successfully", category)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    request_body(content = UpdateCategoryRequest, content_type = "multipart/form-data",
        description = "Fields to change plus optional replacement images"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Category updated, wrapped as { message, data }", body = Category),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody)
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let mut form = MultipartForm::read(multipart, IMAGE_FIELDS).await?;
    let req = update_request(&form)?;
    req.validate()?;
    let uploads = uploads(&mut form)?;

    let category = services::update_category(&state, id, &req, uploads).await?;

    Ok(Json(MessageResponse::new("Category updated successfully", category)).into_response())
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Category deleted, wrapped as { message, data }", body = Category),
        (status = 404, description = "Category not found", body = ErrorBody)
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let category = services::delete_category(&state, id).await?;

    Ok(Json(MessageResponse::new("Category deleted successfully", category)).into_response())
}

fn create_request(form: &MultipartForm) -> Result<CreateCategoryRequest, WebError> {
    Ok(CreateCategoryRequest {
        title: form.text("title").unwrap_or_default(),
        description: form.text("description"),
        lead_id: form.parse("lead_id")?,
        co_lead_id: form.parse("co_lead_id")?,
    })
}

fn update_request(form: &MultipartForm) -> Result<UpdateCategoryRequest, WebError> {
    Ok(UpdateCategoryRequest {
        title: form.text("title"),
        description: form.text("description"),
        lead_id: form.parse("lead_id")?,
        co_lead_id: form.parse("co_lead_id")?,
    })
}

fn uploads(form: &mut MultipartForm) -> Result<CategoryUploads, WebError> {
    Ok(CategoryUploads {
        card: form.take_image("card_image")?,
        banner: form.take_image("banner_image")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::UploadFile;
    use axum::body::Bytes;

    fn image(name: &str) -> UploadFile {
        UploadFile {
            bytes: Bytes::from_static(b"\x89PNG"),
            file_name: Some(name.to_string()),
            content_type: Some("image/png".to_string()),
        }
    }

    #[test]
    fn test_create_request_from_form() {
        let lead = Uuid::new_v4();
        let lead_id = lead.to_string();
        let form = MultipartForm::from_parts(
            &[("title", " Sports "), ("description", ""), ("lead_id", lead_id.as_str())],
            vec![],
        );

        let req = create_request(&form).unwrap();
        assert_eq!(req.title, "Sports");
        assert_eq!(req.description, None);
        assert_eq!(req.lead_id, Some(lead));
        assert_eq!(req.co_lead_id, None);
    }

    #[test]
    fn test_missing_title_fails_validation() {
        let form = MultipartForm::from_parts(&[], vec![]);
        let req = create_request(&form).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_malformed_lead_id_is_rejected() {
        let form = MultipartForm::from_parts(&[("title", "Sports"), ("lead_id", "nope")], vec![]);
        assert!(matches!(create_request(&form), Err(WebError::BadRequest(_))));
    }

    #[test]
    fn test_uploads_require_images() {
        let mut form = MultipartForm::from_parts(
            &[],
            vec![("card_image", image("card.png"))],
        );
        let uploads = uploads(&mut form).unwrap();
        assert!(uploads.card.is_some());
        assert!(uploads.banner.is_none());

        let pdf = UploadFile {
            bytes: Bytes::from_static(b"%PDF"),
            file_name: Some("brochure.pdf".into()),
            content_type: Some("application/pdf".into()),
        };
        let mut form = MultipartForm::from_parts(&[], vec![("banner_image", pdf)]);
        assert!(matches!(super::uploads(&mut form), Err(WebError::BadRequest(_))));
    }
}
