//! Handlers for the `/projects/{project_id}/milestones` resource.
//!
//! Every handler resolves the parent project first, so a bad `project_id`
//! reports as the missing parent and ownership checks have the owning
//! client at hand. The body's `project_id` is always overridden with the
//! value from the URL path.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use lollyshoppe_core::error::CoreError;
use lollyshoppe_core::types::DbId;
use lollyshoppe_db::models::milestone::{Milestone, MilestoneForm, ReorderMilestones};
use lollyshoppe_db::repositories::MilestoneRepo;
use lollyshoppe_events::{topics, DomainEvent};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

fn invalidation(project_id: DbId) -> Vec<String> {
    vec![
        topics::projects_list(),
        topics::project_detail(project_id),
        topics::client_dashboard(),
    ]
}

/// POST /api/v1/projects/{project_id}/milestones
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(project_id): Path<DbId>,
    Json(mut input): Json<MilestoneForm>,
) -> AppResult<(StatusCode, Json<ApiResponse<Milestone>>)> {
    input.project_id = project_id;
    input.validate()?;
    super::load_project(&state.pool, project_id).await?;

    let milestone = MilestoneRepo::create(&state.pool, &input).await?;

    state.event_bus.publish(
        DomainEvent::new("milestone.created")
            .with_source("milestone", milestone.id)
            .with_actor(admin.id)
            .with_topics(invalidation(project_id)),
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(milestone))))
}

/// GET /api/v1/projects/{project_id}/milestones
pub async fn list_by_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<Milestone>>>> {
    let project = super::load_project(&state.pool, project_id).await?;
    super::ensure_can_view(&user, project.client_id)?;

    let milestones = MilestoneRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(ApiResponse::new(milestones)))
}

/// GET /api/v1/projects/{project_id}/milestones/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ApiResponse<Milestone>>> {
    let project = super::load_project(&state.pool, project_id).await?;
    super::ensure_can_view(&user, project.client_id)?;

    let milestone = MilestoneRepo::find_by_id(&state.pool, id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))?;
    Ok(Json(ApiResponse::new(milestone)))
}

/// PUT /api/v1/projects/{project_id}/milestones/{id}
///
/// Full-field replace of the form fields; the completion timestamp is only
/// ever written by the toggle transition.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(mut input): Json<MilestoneForm>,
) -> AppResult<Json<ApiResponse<Milestone>>> {
    input.project_id = project_id;
    input.validate()?;
    super::load_project(&state.pool, project_id).await?;

    let milestone = MilestoneRepo::update(&state.pool, id, project_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))?;

    state.event_bus.publish(
        DomainEvent::new("milestone.updated")
            .with_source("milestone", milestone.id)
            .with_actor(admin.id)
            .with_topics(invalidation(project_id)),
    );

    Ok(Json(ApiResponse::new(milestone)))
}

/// DELETE /api/v1/projects/{project_id}/milestones/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ApiResponse<()>>> {
    super::load_project(&state.pool, project_id).await?;

    let deleted = MilestoneRepo::delete(&state.pool, id, project_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }));
    }

    state.event_bus.publish(
        DomainEvent::new("milestone.deleted")
            .with_source("milestone", id)
            .with_actor(admin.id)
            .with_topics(invalidation(project_id)),
    );

    Ok(Json(ApiResponse::new(())))
}

/// POST /api/v1/projects/{project_id}/milestones/{id}/toggle-complete
///
/// Flips completion in a single conditional update; calling it twice
/// restores the original completion state.
pub async fn toggle_complete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ApiResponse<Milestone>>> {
    super::load_project(&state.pool, project_id).await?;

    let milestone = MilestoneRepo::toggle_complete(&state.pool, id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))?;

    state.event_bus.publish(
        DomainEvent::new("milestone.completion_toggled")
            .with_source("milestone", milestone.id)
            .with_actor(admin.id)
            .with_topics(invalidation(project_id)),
    );

    Ok(Json(ApiResponse::new(milestone)))
}

/// POST /api/v1/projects/{project_id}/milestones/reorder
///
/// Assigns display order by position in the supplied id sequence. The batch
/// is transactional: an id that does not belong to this project aborts the
/// whole operation with nothing applied.
pub async fn reorder(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReorderMilestones>,
) -> AppResult<Json<ApiResponse<Vec<Milestone>>>> {
    super::load_project(&state.pool, project_id).await?;

    let applied = MilestoneRepo::reorder(&state.pool, project_id, &input.milestone_ids).await?;
    if !applied {
        return Err(AppError::Core(CoreError::Validation(
            "One or more milestones do not belong to this project".into(),
        )));
    }

    state.event_bus.publish(
        DomainEvent::new("milestone.reordered")
            .with_source("project", project_id)
            .with_actor(admin.id)
            .with_topics(invalidation(project_id)),
    );

    let milestones = MilestoneRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(ApiResponse::new(milestones)))
}
