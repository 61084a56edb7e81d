//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users` (admin only).
///
/// ```text
/// GET /         -> list
/// GET /clients  -> list_clients
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/clients", get(users::list_clients))
}
