//! Role-based access control extractors.
//!
//! Every mutation route requires [`RequireAdmin`]; read routes take
//! [`CurrentUser`](super::auth::CurrentUser) and scope rows to the caller
//! where the caller is a client.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lollyshoppe_core::error::CoreError;
use lollyshoppe_core::status::UserRole;
use lollyshoppe_db::models::user::User;

use super::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the ADMIN role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.role != UserRole::Admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
