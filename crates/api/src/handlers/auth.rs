//! Handlers for the `/auth` resource (identity sync).
//!
//! Credentials, sessions, and token issuance all live with the external
//! identity provider; the only auth operation this server owns is mapping
//! a provider identity to a local user row.

use axum::extract::State;
use lollyshoppe_db::models::user::{SyncUser, User};
use lollyshoppe_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::{CurrentUser, Identity};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/auth/sync
///
/// Resolve the presented identity to its local user, creating one with role
/// CLIENT on first sight. Idempotent: repeated calls for the same subject
/// return the same row, unchanged.
pub async fn sync(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = UserRepo::find_or_create(
        &state.pool,
        &SyncUser {
            external_id: identity.subject,
            email: identity.email,
            first_name: identity.given_name,
            last_name: identity.family_name,
        },
    )
    .await?;

    Ok(Json(ApiResponse::new(user)))
}

/// GET /api/v1/auth/me
///
/// The synced local user behind the presented token.
pub async fn me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<User>> {
    Json(ApiResponse::new(user))
}
