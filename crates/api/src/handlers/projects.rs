//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use lollyshoppe_core::error::CoreError;
use lollyshoppe_core::status::UserRole;
use lollyshoppe_core::types::DbId;
use lollyshoppe_db::models::project::{Project, ProjectDetail, ProjectForm, ProjectListItem};
use lollyshoppe_db::repositories::{DeliverableRepo, MilestoneRepo, ProjectRepo, UserRepo};
use lollyshoppe_events::{topics, DomainEvent};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// The owning client must exist and actually be a CLIENT account.
async fn ensure_client_ref(pool: &PgPool, client_id: DbId) -> Result<(), AppError> {
    let client = UserRepo::find_by_id(pool, client_id).await?;
    match client {
        Some(user) if user.role == UserRole::Client => Ok(()),
        Some(_) => Err(AppError::Core(CoreError::Validation(
            "Selected client is not a CLIENT account".into(),
        ))),
        None => Err(AppError::Core(CoreError::Validation(
            "Selected client does not exist".into(),
        ))),
    }
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<ProjectForm>,
) -> AppResult<(StatusCode, Json<ApiResponse<Project>>)> {
    input.validate()?;
    ensure_client_ref(&state.pool, input.client_id).await?;

    let project = ProjectRepo::create(&state.pool, &input).await?;

    state.event_bus.publish(
        DomainEvent::new("project.created")
            .with_source("project", project.id)
            .with_actor(admin.id)
            .with_topics(vec![
                topics::admin_dashboard(),
                topics::projects_list(),
                topics::client_dashboard(),
            ]),
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(project))))
}

/// GET /api/v1/projects
///
/// Admins see every project; clients only their own.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<ProjectListItem>>>> {
    let projects = match user.role {
        UserRole::Admin => ProjectRepo::list(&state.pool).await?,
        UserRole::Client => ProjectRepo::list_by_client(&state.pool, user.id).await?,
    };
    Ok(Json(ApiResponse::new(projects)))
}

/// GET /api/v1/projects/{id}
///
/// Full detail: the project with its client references and ordered
/// milestones and deliverables.
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<ProjectDetail>>> {
    let project = super::load_project(&state.pool, id).await?;
    super::ensure_can_view(&user, project.client_id)?;

    let client = UserRepo::find_by_id(&state.pool, project.client_id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Project {id} has no client row")))?;
    let milestones = MilestoneRepo::list_by_project(&state.pool, id).await?;
    let deliverables = DeliverableRepo::list_by_project(&state.pool, id).await?;

    Ok(Json(ApiResponse::new(ProjectDetail {
        project,
        client_email: client.email,
        client_first_name: client.first_name,
        client_last_name: client.last_name,
        milestones,
        deliverables,
    })))
}

/// PUT /api/v1/projects/{id}
///
/// Full-field replace: absent optional fields clear the stored values.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ProjectForm>,
) -> AppResult<Json<ApiResponse<Project>>> {
    input.validate()?;
    ensure_client_ref(&state.pool, input.client_id).await?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    state.event_bus.publish(
        DomainEvent::new("project.updated")
            .with_source("project", project.id)
            .with_actor(admin.id)
            .with_topics(vec![
                topics::admin_dashboard(),
                topics::projects_list(),
                topics::project_detail(project.id),
                topics::client_dashboard(),
            ]),
    );

    Ok(Json(ApiResponse::new(project)))
}

/// DELETE /api/v1/projects/{id}
///
/// Cascades to the project's milestones and deliverables; linked invoices
/// are detached, not deleted.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    state.event_bus.publish(
        DomainEvent::new("project.deleted")
            .with_source("project", id)
            .with_actor(admin.id)
            .with_topics(vec![
                topics::admin_dashboard(),
                topics::projects_list(),
                topics::client_dashboard(),
            ]),
    );

    Ok(Json(ApiResponse::new(())))
}
