//! Handlers for the `/projects/{project_id}/deliverables` resource.
//!
//! Mirrors the milestone handlers: parent project resolved first, body
//! `project_id` overridden from the URL path.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use lollyshoppe_core::error::CoreError;
use lollyshoppe_core::types::DbId;
use lollyshoppe_db::models::deliverable::{Deliverable, DeliverableForm};
use lollyshoppe_db::repositories::DeliverableRepo;
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

/// POST /api/v1/projects/{project_id}/deliverables
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(project_id): Path<DbId>,
    Json(mut input): Json<DeliverableForm>,
) -> AppResult<(StatusCode, Json<ApiResponse<Deliverable>>)> {
    input.project_id = project_id;
    input.validate()?;
    super::load_project(&state.pool, project_id).await?;

    let deliverable = DeliverableRepo::create(&state.pool, &input).await?;

    state.event_bus.publish(
        DomainEvent::new("deliverable.created")
            .with_source("deliverable", deliverable.id)
            .with_actor(admin.id)
            .with_topics(invalidation(project_id)),
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(deliverable))))
}

/// GET /api/v1/projects/{project_id}/deliverables
pub async fn list_by_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<Deliverable>>>> {
    let project = super::load_project(&state.pool, project_id).await?;
    super::ensure_can_view(&user, project.client_id)?;

    let deliverables = DeliverableRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(ApiResponse::new(deliverables)))
}

/// GET /api/v1/projects/{project_id}/deliverables/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ApiResponse<Deliverable>>> {
    let project = super::load_project(&state.pool, project_id).await?;
    super::ensure_can_view(&user, project.client_id)?;

    let deliverable = DeliverableRepo::find_by_id(&state.pool, id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Deliverable",
            id,
        }))?;
    Ok(Json(ApiResponse::new(deliverable)))
}

/// PUT /api/v1/projects/{project_id}/deliverables/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(mut input): Json<DeliverableForm>,
) -> AppResult<Json<ApiResponse<Deliverable>>> {
    input.project_id = project_id;
    input.validate()?;
    super::load_project(&state.pool, project_id).await?;

    let deliverable = DeliverableRepo::update(&state.pool, id, project_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Deliverable",
            id,
        }))?;

    state.event_bus.publish(
        DomainEvent::new("deliverable.updated")
            .with_source("deliverable", deliverable.id)
            .with_actor(admin.id)
            .with_topics(invalidation(project_id)),
    );

    Ok(Json(ApiResponse::new(deliverable)))
}

/// DELETE /api/v1/projects/{project_id}/deliverables/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ApiResponse<()>>> {
    super::load_project(&state.pool, project_id).await?;

    let deleted = DeliverableRepo::delete(&state.pool, id, project_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Deliverable",
            id,
        }));
    }

    state.event_bus.publish(
        DomainEvent::new("deliverable.deleted")
            .with_source("deliverable", id)
            .with_actor(admin.id)
            .with_topics(invalidation(project_id)),
    );

    Ok(Json(ApiResponse::new(())))
}
