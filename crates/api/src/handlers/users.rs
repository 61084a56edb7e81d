//! Handlers for the `/users` resource (admin-only listings).

use axum::extract::State;
use lollyshoppe_core::status::UserRole;
use lollyshoppe_db::models::user::User;
use lollyshoppe_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::new(users)))
}

/// GET /api/v1/users/clients
///
/// Accounts with role CLIENT; feeds the owning-client dropdowns in the
/// admin project and invoice forms.
pub async fn list_clients(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let clients = UserRepo::list_by_role(&state.pool, UserRole::Client).await?;
    Ok(Json(ApiResponse::new(clients)))
}
