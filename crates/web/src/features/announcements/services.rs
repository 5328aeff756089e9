use sqlx::PgPool;
use storage::{
    dto::announcement::{AnnouncementFilter, CreateAnnouncementRequest, UpdateAnnouncementRequest},
    error::Result,
    models::Announcement,
    repository::AnnouncementRepository,
};
use uuid::Uuid;

/// Newest first, optionally narrowed to one audience
pub async fn list_announcements(
    pool: &PgPool,
    filter: &AnnouncementFilter,
) -> Result<Vec<Announcement>> {
    AnnouncementRepository::new(pool).list(filter).await
}

pub async fn get_announcement(pool: &PgPool, id: Uuid) -> Result<Announcement> {
    AnnouncementRepository::new(pool).find_by_id(id).await
}

pub async fn create_announcement(
    pool: &PgPool,
    req: &CreateAnnouncementRequest,
) -> Result<Announcement> {
    AnnouncementRepository::new(pool).create(req).await
}

pub async fn update_announcement(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateAnnouncementRequest,
) -> Result<Announcement> {
    AnnouncementRepository::new(pool).update(id, req).await
}

pub async fn delete_announcement(pool: &PgPool, id: Uuid) -> Result<()> {
    AnnouncementRepository::new(pool).delete(id).await
}
