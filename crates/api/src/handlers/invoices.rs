//! Handlers for the `/invoices` resource.
//!
//! Invoices reference a client (required) and a project (optional, weak).
//! Consistency between the invoice's client and a linked project's client
//! is deliberately not enforced.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use lollyshoppe_core::error::CoreError;
use lollyshoppe_core::status::UserRole;
use lollyshoppe_core::types::DbId;
use lollyshoppe_db::models::invoice::{Invoice, InvoiceForm, InvoiceListItem};
use lollyshoppe_db::repositories::{InvoiceRepo, UserRepo};
use lollyshoppe_events::{topics, DomainEvent};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

fn invalidation() -> Vec<String> {
    vec![
        topics::admin_dashboard(),
        topics::invoices_list(),
        topics::client_dashboard(),
    ]
}

/// The billed client must exist (any role; admins can be billed too).
async fn ensure_client_ref(pool: &PgPool, client_id: DbId) -> Result<(), AppError> {
    if UserRepo::find_by_id(pool, client_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Selected client does not exist".into(),
        )));
    }
    Ok(())
}

/// POST /api/v1/invoices
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<InvoiceForm>,
) -> AppResult<(StatusCode, Json<ApiResponse<Invoice>>)> {
    input.validate()?;
    ensure_client_ref(&state.pool, input.client_id).await?;

    let invoice = InvoiceRepo::create(&state.pool, &input).await?;

    state.event_bus.publish(
        DomainEvent::new("invoice.created")
            .with_source("invoice", invoice.id)
            .with_actor(admin.id)
            .with_topics(invalidation()),
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(invoice))))
}

/// GET /api/v1/invoices
///
/// Admins see every invoice; clients only their own.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<InvoiceListItem>>>> {
    let invoices = match user.role {
        UserRole::Admin => InvoiceRepo::list(&state.pool).await?,
        UserRole::Client => InvoiceRepo::list_by_client(&state.pool, user.id).await?,
    };
    Ok(Json(ApiResponse::new(invoices)))
}

/// GET /api/v1/invoices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<InvoiceListItem>>> {
    let invoice = InvoiceRepo::find_with_refs(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;
    super::ensure_can_view(&user, invoice.client_id)?;

    Ok(Json(ApiResponse::new(invoice)))
}

/// PUT /api/v1/invoices/{id}
///
/// Full-field replace; `paid_at` is untouched here.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<InvoiceForm>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    input.validate()?;
    ensure_client_ref(&state.pool, input.client_id).await?;

    let invoice = InvoiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;

    state.event_bus.publish(
        DomainEvent::new("invoice.updated")
            .with_source("invoice", invoice.id)
            .with_actor(admin.id)
            .with_topics(invalidation()),
    );

    Ok(Json(ApiResponse::new(invoice)))
}

/// DELETE /api/v1/invoices/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let deleted = InvoiceRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }));
    }

    state.event_bus.publish(
        DomainEvent::new("invoice.deleted")
            .with_source("invoice", id)
            .with_actor(admin.id)
            .with_topics(invalidation()),
    );

    Ok(Json(ApiResponse::new(())))
}

/// POST /api/v1/invoices/{id}/mark-paid
///
/// Sets status to PAID and stamps `paid_at`, whatever the prior status.
/// Repeated calls keep PAID and advance the timestamp.
pub async fn mark_paid(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    let invoice = InvoiceRepo::mark_paid(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;

    state.event_bus.publish(
        DomainEvent::new("invoice.paid")
            .with_source("invoice", invoice.id)
            .with_actor(admin.id)
            .with_topics(invalidation()),
    );

    Ok(Json(ApiResponse::new(invoice)))
}
