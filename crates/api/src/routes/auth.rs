//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /sync -> sync (identity resolution, idempotent)
/// GET  /me   -> me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sync", post(auth::sync))
        .route("/me", get(auth::me))
}
