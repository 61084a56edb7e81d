//! HTTP handlers, one module per resource.

pub mod auth;
pub mod dashboard;
pub mod deliverables;
pub mod invoices;
pub mod milestones;
pub mod projects;
pub mod users;

use lollyshoppe_core::error::CoreError;
use lollyshoppe_core::status::UserRole;
use lollyshoppe_core::types::DbId;
use lollyshoppe_db::models::project::Project;
use lollyshoppe_db::models::user::User;
use lollyshoppe_db::repositories::ProjectRepo;
use sqlx::PgPool;

use crate::error::AppError;

/// Resolve a project or fail with the not-found envelope. Child-resource
/// handlers call this before touching milestones/deliverables so a bad
/// `project_id` reports as the missing parent.
pub(crate) async fn load_project(pool: &PgPool, project_id: DbId) -> Result<Project, AppError> {
    ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
}

/// Admins see everything; clients only records owned by them.
pub(crate) fn ensure_can_view(user: &User, owning_client_id: DbId) -> Result<(), AppError> {
    if user.role == UserRole::Admin || user.id == owning_client_id {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(
        "You do not have access to this record".into(),
    )))
}
