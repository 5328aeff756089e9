use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::judge::{AnnounceResultRequest, CreateJudgeRequest, UpdateJudgeRequest};
use crate::error::{Result, StorageError};
use crate::models::{Judge, JudgeAssignment, JudgeAssignmentDetail};

const JUDGE_COLUMNS: &str = "judge_id, name, email, contact, account_id, created_at, updated_at";

const ASSIGNMENT_COLUMNS: &str =
    "assignment_id, judge_id, game_id, status, winner, runner_up, announced_at";

const GAME_MISSING: &str = "Assigned game does not exist";

pub struct JudgeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> JudgeRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert the judge profile and its game assignment atomically
    pub async fn create(&self, req: &CreateJudgeRequest, account_id: Uuid) -> Result<Judge> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            INSERT INTO judges (name, email, contact, account_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {JUDGE_COLUMNS}
            "#
        );

        let judge = sqlx::query_as::<_, Judge>(&sql)
            .bind(&req.name)
            .bind(&req.email)
            .bind(&req.contact)
            .bind(account_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| StorageError::from(e).on_unique("A judge with this email already exists"))?;

        for game_id in &req.assigned_games {
            insert_assignment(&mut tx, judge.judge_id, *game_id).await?;
        }

        tx.commit().await?;

        Ok(judge)
    }

    pub async fn list(&self) -> Result<Vec<Judge>> {
        let sql = format!("SELECT {JUDGE_COLUMNS} FROM judges ORDER BY created_at DESC");

        let judges = sqlx::query_as::<_, Judge>(&sql).fetch_all(self.pool).await?;

        Ok(judges)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Judge> {
        let sql = format!("SELECT {JUDGE_COLUMNS} FROM judges WHERE judge_id = $1");

        let judge = sqlx::query_as::<_, Judge>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(judge)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Judge>> {
        let sql = format!("SELECT {JUDGE_COLUMNS} FROM judges WHERE email = $1");

        let judge = sqlx::query_as::<_, Judge>(&sql)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(judge)
    }

    /// The judge profile backing a login account
    pub async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Judge>> {
        let sql = format!("SELECT {JUDGE_COLUMNS} FROM judges WHERE account_id = $1");

        let judge = sqlx::query_as::<_, Judge>(&sql)
            .bind(account_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(judge)
    }

    /// Merge profile fields and, when `assigned_games` is present, replace the assignment
    pub async fn update(&self, id: Uuid, req: &UpdateJudgeRequest) -> Result<Judge> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            UPDATE judges
            SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                contact = COALESCE($4, contact),
                updated_at = NOW()
            WHERE judge_id = $1
            RETURNING {JUDGE_COLUMNS}
            "#
        );

        let judge = sqlx::query_as::<_, Judge>(&sql)
            .bind(id)
            .bind(&req.name)
            .bind(&req.email)
            .bind(&req.contact)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| StorageError::from(e).on_unique("A judge with this email already exists"))?
            .ok_or(StorageError::NotFound)?;

        if let Some(ref games) = req.assigned_games {
            sqlx::query("DELETE FROM judge_assignments WHERE judge_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for game_id in games {
                insert_assignment(&mut tx, id, *game_id).await?;
            }
        }

        tx.commit().await?;

        Ok(judge)
    }

    pub async fn assignments(&self, judge_id: Uuid) -> Result<Vec<JudgeAssignment>> {
        let sql = format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM judge_assignments WHERE judge_id = $1"
        );

        let assignments = sqlx::query_as::<_, JudgeAssignment>(&sql)
            .bind(judge_id)
            .fetch_all(self.pool)
            .await?;

        Ok(assignments)
    }

    /// Assignments joined with their games, as shown on the judge panel
    pub async fn assignment_details(&self, judge_id: Uuid) -> Result<Vec<JudgeAssignmentDetail>> {
        let details = sqlx::query_as::<_, JudgeAssignmentDetail>(
            r#"
            SELECT ja.assignment_id, ja.game_id, g.title AS game_title, g.date AS game_date,
                   g.time AS game_time, g.venue, ja.status, ja.winner, ja.runner_up,
                   ja.announced_at
            FROM judge_assignments ja
            INNER JOIN games g ON g.game_id = ja.game_id
            WHERE ja.judge_id = $1
            ORDER BY g.created_at DESC
            "#,
        )
        .bind(judge_id)
        .fetch_all(self.pool)
        .await?;

        Ok(details)
    }

    /// Record the result of an assigned game. `NotFound` when the game is not assigned to the judge.
    pub async fn announce_result(
        &self,
        judge_id: Uuid,
        game_id: Uuid,
        req: &AnnounceResultRequest,
    ) -> Result<JudgeAssignment> {
        let sql = format!(
            r#"
            UPDATE judge_assignments
            SET status = 'completed', winner = $3, runner_up = $4, announced_at = NOW()
            WHERE judge_id = $1 AND game_id = $2
            RETURNING {ASSIGNMENT_COLUMNS}
            "#
        );

        let assignment = sqlx::query_as::<_, JudgeAssignment>(&sql)
            .bind(judge_id)
            .bind(game_id)
            .bind(&req.winner)
            .bind(&req.runner_up)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(assignment)
    }

    /// Delete a judge, returning the removed row so the linked account can be removed too
    pub async fn delete(&self, id: Uuid) -> Result<Judge> {
        let sql = format!("DELETE FROM judges WHERE judge_id = $1 RETURNING {JUDGE_COLUMNS}");

        let judge = sqlx::query_as::<_, Judge>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(judge)
    }
}

async fn insert_assignment(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    judge_id: Uuid,
    game_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO judge_assignments (judge_id, game_id)
        VALUES ($1, $2)
        ON CONFLICT (judge_id, game_id) DO NOTHING
        "#,
    )
    .bind(judge_id)
    .bind(game_id)
    .execute(&mut **tx)
    .await
    .map_err(|e| StorageError::from(e).on_foreign_key(GAME_MISSING))?;

    Ok(())
}
