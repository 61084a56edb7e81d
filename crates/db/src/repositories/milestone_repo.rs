//! Repository for the `milestones` table.
//!
//! All row-addressing methods are scoped by `project_id` as well as `id`,
//! so a milestone can never be touched through another project's routes.

use lollyshoppe_core::types::DbId;
use sqlx::PgPool;

use crate::models::milestone::{Milestone, MilestoneForm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, due_date, completed_at, sort_order, project_id, \
     created_at, updated_at";

/// Provides CRUD and transition operations for milestones.
pub struct MilestoneRepo;

impl MilestoneRepo {
    /// Insert a new milestone, returning the created row.
    pub async fn create(pool: &PgPool, input: &MilestoneForm) -> Result<Milestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO milestones (title, description, due_date, sort_order, project_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date)
            .bind(input.sort_order)
            .bind(input.project_id)
            .fetch_one(pool)
            .await
    }

    /// Find a milestone by ID within a project.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestones WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's milestones in display order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Milestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM milestones WHERE project_id = $1 ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Full-field replace of a milestone. `completed_at` is untouched; only
    /// the toggle transition writes it.
    ///
    /// Returns `None` if the project has no milestone with this `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
        input: &MilestoneForm,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "UPDATE milestones SET
                title = $3,
                description = $4,
                due_date = $5,
                sort_order = $6
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a milestone. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, project_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM milestones WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip completion in a single conditional UPDATE: stamps `completed_at`
    /// with NOW() when it is null, clears it otherwise. Atomic at the
    /// storage layer, so concurrent toggles cannot interleave a stale read.
    ///
    /// Returns `None` if the project has no milestone with this `id`.
    pub async fn toggle_complete(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "UPDATE milestones
             SET completed_at = CASE WHEN completed_at IS NULL THEN NOW() ELSE NULL END
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Assign `sort_order` by position (0-based) in the supplied sequence,
    /// inside one transaction. If any id does not belong to the project the
    /// whole batch rolls back and `Ok(false)` is returned; a partially
    /// reordered list is never left behind.
    pub async fn reorder(
        pool: &PgPool,
        project_id: DbId,
        milestone_ids: &[DbId],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (position, id) in milestone_ids.iter().enumerate() {
            let result =
                sqlx::query("UPDATE milestones SET sort_order = $1 WHERE id = $2 AND project_id = $3")
                    .bind(position as i32)
                    .bind(id)
                    .bind(project_id)
                    .execute(&mut *tx)
                    .await?;
            if result.rows_affected() == 0 {
                tx.rollback().await?;
                return Ok(false);
            }
        }

        tx.commit().await?;
        Ok(true)
    }
}
