use sqlx::PgPool;
use storage::{
    dto::event::{CreateEventRequest, UpdateEventRequest},
    error::Result,
    models::Event,
    repository::EventRepository,
};
use uuid::Uuid;

pub async fn list_events(pool: &PgPool) -> Result<Vec<Event>> {
    EventRepository::new(pool).list().await
}

pub async fn get_event(pool: &PgPool, id: Uuid) -> Result<Event> {
    EventRepository::new(pool).find_by_id(id).await
}

pub async fn create_event(pool: &PgPool, req: &CreateEventRequest) -> Result<Event> {
    EventRepository::new(pool).create(req).await
}

pub async fn update_event(pool: &PgPool, id: Uuid, req: &UpdateEventRequest) -> Result<Event> {
    EventRepository::new(pool).update(id, req).await
}

pub async fn delete_event(pool: &PgPool, id: Uuid) -> Result<()> {
    EventRepository::new(pool).delete(id).await
}
