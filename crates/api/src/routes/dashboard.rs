//! Route definitions for the dashboard overview endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /admin  -> admin_overview (admin only)
/// GET /client -> client_overview (any synced user)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard::admin_overview))
        .route("/client", get(dashboard::client_overview))
}
