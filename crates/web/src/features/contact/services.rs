use sqlx::PgPool;
use storage::{
    dto::contact::CreateContactRequest, error::Result, models::ContactMessage,
    repository::ContactRepository,
};

pub async fn submit_message(pool: &PgPool, req: &CreateContactRequest) -> Result<ContactMessage> {
    ContactRepository::new(pool).create(req).await
}
