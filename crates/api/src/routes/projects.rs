//! Route definitions for the `/projects` resource.
//!
//! Also nests milestone and deliverable routes under
//! `/projects/{project_id}/...` -- both are lifecycle-bound to their
//! project and only addressable through it.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{deliverables, milestones, projects};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                          -> list
/// POST   /                                          -> create
/// GET    /{id}                                      -> get_by_id (detail)
/// PUT    /{id}                                      -> update
/// DELETE /{id}                                      -> delete
///
/// GET    /{project_id}/milestones                   -> list_by_project
/// POST   /{project_id}/milestones                   -> create
/// POST   /{project_id}/milestones/reorder           -> reorder
/// GET    /{project_id}/milestones/{id}              -> get_by_id
/// PUT    /{project_id}/milestones/{id}              -> update
/// DELETE /{project_id}/milestones/{id}              -> delete
/// POST   /{project_id}/milestones/{id}/toggle-complete -> toggle_complete
///
/// GET    /{project_id}/deliverables                 -> list_by_project
/// POST   /{project_id}/deliverables                 -> create
/// GET    /{project_id}/deliverables/{id}            -> get_by_id
/// PUT    /{project_id}/deliverables/{id}            -> update
/// DELETE /{project_id}/deliverables/{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    let milestone_routes = Router::new()
        .route(
            "/",
            get(milestones::list_by_project).post(milestones::create),
        )
        .route("/reorder", post(milestones::reorder))
        .route(
            "/{id}",
            get(milestones::get_by_id)
                .put(milestones::update)
                .delete(milestones::delete),
        )
        .route("/{id}/toggle-complete", post(milestones::toggle_complete));

    let deliverable_routes = Router::new()
        .route(
            "/",
            get(deliverables::list_by_project).post(deliverables::create),
        )
        .route(
            "/{id}",
            get(deliverables::get_by_id)
                .put(deliverables::update)
                .delete(deliverables::delete),
        );

    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .nest("/{project_id}/milestones", milestone_routes)
        .nest("/{project_id}/deliverables", deliverable_routes)
}
