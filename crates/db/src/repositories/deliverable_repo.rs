//! Repository for the `deliverables` table.
//!
//! Like milestones, all row-addressing methods are scoped by `project_id`.

use lollyshoppe_core::types::DbId;
use sqlx::PgPool;

use crate::models::deliverable::{Deliverable, DeliverableForm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, file_url, project_id, created_at, updated_at";

/// Provides CRUD operations for deliverables.
pub struct DeliverableRepo;

impl DeliverableRepo {
    /// Insert a new deliverable, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &DeliverableForm,
    ) -> Result<Deliverable, sqlx::Error> {
        let query = format!(
            "INSERT INTO deliverables (title, description, file_url, project_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.file_url)
            .bind(input.project_id)
            .fetch_one(pool)
            .await
    }

    /// Find a deliverable by ID within a project.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM deliverables WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's deliverables, most recently created first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Deliverable>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM deliverables WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Full-field replace of a deliverable.
    ///
    /// Returns `None` if the project has no deliverable with this `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
        input: &DeliverableForm,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        let query = format!(
            "UPDATE deliverables SET
                title = $3,
                description = $4,
                file_url = $5
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.file_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a deliverable. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, project_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM deliverables WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
