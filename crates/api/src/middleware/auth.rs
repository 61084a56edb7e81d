//! Authentication extractors for Axum handlers.
//!
//! [`Identity`] yields the provider-asserted claims from the Bearer token.
//! [`CurrentUser`] additionally resolves (and on first sight creates) the
//! local user row behind that identity -- every request through it performs
//! the idempotent identity sync, so a freshly signed-up caller is usable
//! immediately with role CLIENT.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lollyshoppe_core::error::CoreError;
use lollyshoppe_db::models::user::{SyncUser, User};
use lollyshoppe_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Externally-authenticated identity extracted from a JWT Bearer token in
/// the `Authorization` header. No database access happens here.
#[derive(Debug, Clone)]
pub struct Identity {
    /// The provider's opaque subject id for the caller.
    pub subject: String,
    /// Verified email address.
    pub email: String,
    /// Optional first name.
    pub given_name: Option<String>,
    /// Optional last name.
    pub family_name: Option<String>,
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(Identity {
            subject: claims.sub,
            email: claims.email,
            given_name: claims.given_name,
            family_name: claims.family_name,
        })
    }
}

/// The local user behind the presented identity, synced on first sight.
///
/// Use this as an extractor parameter in any handler that needs the
/// caller's role or ownership scope:
///
/// ```ignore
/// async fn my_handler(CurrentUser(user): CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.id, role = ?user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;

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

        Ok(CurrentUser(user))
    }
}
