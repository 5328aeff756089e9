use sqlx::PgPool;
use storage::{
    dto::application::{CreateApplicationRequest, GAME_POSTS, GamePostHolders},
    error::Result,
    models::Application,
    repository::{AccountRepository, ApplicationRepository},
    services::review::{self, ReviewError, ReviewOutcome},
};
use uuid::Uuid;

pub async fn create_application(
    pool: &PgPool,
    request: &CreateApplicationRequest,
) -> Result<Application> {
    ApplicationRepository::new(pool).create(request).await
}

pub async fn list_applications(pool: &PgPool) -> Result<Vec<Application>> {
    ApplicationRepository::new(pool).list().await
}

pub async fn applications_by_email(pool: &PgPool, email: &str) -> Result<Vec<Application>> {
    ApplicationRepository::new(pool).find_by_email(email).await
}

/// Leads and co-leads of the game posts
pub async fn game_post_holders(pool: &PgPool) -> Result<GamePostHolders> {
    let applications = ApplicationRepository::new(pool)
        .list_by_posts(GAME_POSTS)
        .await?;

    Ok(group_by_subpost(applications))
}

/// Change the status and, on acceptance, promote the applicant's account
pub async fn review_application(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> std::result::Result<ReviewOutcome, ReviewError> {
    let applications = ApplicationRepository::new(pool);
    let accounts = AccountRepository::new(pool);

    review::review_application(&applications, &accounts, id, status).await
}

pub async fn delete_application(pool: &PgPool, id: Uuid) -> Result<Application> {
    ApplicationRepository::new(pool).delete(id).await
}

fn group_by_subpost(applications: Vec<Application>) -> GamePostHolders {
    let (lead, others): (Vec<_>, Vec<_>) = applications
        .into_iter()
        .partition(|a| a.subpost == "Lead");

    let co_lead = others.into_iter().filter(|a| a.subpost == "Co-Lead").collect();

    GamePostHolders { lead, co_lead }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn application(post: &str, subpost: &str) -> Application {
        let now = Utc::now().naive_utc();
        Application {
            application_id: Uuid::new_v4(),
            name: "Bilal".into(),
            roll_number: "BSIT-22-031".into(),
            contact_number: "03211234567".into(),
            email: None,
            post: post.into(),
            subpost: subpost.into(),
            category_interested_in: None,
            additional_details: None,
            status: "Pending".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_group_by_subpost() {
        let grouped = group_by_subpost(vec![
            application("E-Games", "Lead"),
            application("Geek Games", "Co-Lead"),
            application("General Games", "Lead"),
            application("E-Games", "Member"),
        ]);

        assert_eq!(grouped.lead.len(), 2);
        assert_eq!(grouped.co_lead.len(), 1);
        assert_eq!(grouped.co_lead[0].post, "Geek Games");
    }
}
