//! Repository for the `projects` table.

use lollyshoppe_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{Project, ProjectForm, ProjectListItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description, status, budget, start_date, end_date, client_id, created_at, updated_at";

/// Columns for the joined list view: project fields, client display
/// references, and child counts.
const LIST_COLUMNS: &str = "p.id, p.title, p.description, p.status, p.budget, p.start_date, \
     p.end_date, p.client_id, p.created_at, p.updated_at, \
     u.email AS client_email, u.first_name AS client_first_name, u.last_name AS client_last_name, \
     (SELECT COUNT(*) FROM milestones m WHERE m.project_id = p.id) AS milestone_count, \
     (SELECT COUNT(*) FROM deliverables d WHERE d.project_id = p.id) AS deliverable_count";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &ProjectForm) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description, status, budget, start_date, end_date, client_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.budget)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.client_id)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects with client references and child counts, most
    /// recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM projects p
             JOIN users u ON u.id = p.client_id
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectListItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// List one client's projects, most recently created first.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<ProjectListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM projects p
             JOIN users u ON u.id = p.client_id
             WHERE p.client_id = $1
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectListItem>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Full-field replace of a project. Absent optional fields clear the
    /// stored values.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ProjectForm,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = $2,
                description = $3,
                status = $4,
                budget = $5,
                start_date = $6,
                end_date = $7,
                client_id = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.budget)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.client_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. The milestone/deliverable cascade runs inside
    /// the same statement via the schema's ON DELETE CASCADE; linked invoices
    /// are detached, not deleted. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
