//! Handlers for the dashboard overview endpoints.
//!
//! Every figure here is derived on the fly from freshly fetched rows via
//! the pure helpers in `lollyshoppe_core::summary`; nothing is persisted
//! and nothing is cached server-side.

use axum::extract::State;
use lollyshoppe_core::status::{InvoiceStatus, ProjectStatus};
use lollyshoppe_core::summary;
use lollyshoppe_db::models::invoice::InvoiceListItem;
use lollyshoppe_db::models::project::ProjectListItem;
use lollyshoppe_db::repositories::{InvoiceRepo, MilestoneRepo, ProjectRepo, UserRepo};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Invoice money figures, all derived from one fetched list.
#[derive(Debug, Serialize)]
pub struct InvoiceTotals {
    /// Sum over every invoice regardless of status.
    pub invoiced: Decimal,
    /// Sum over PAID invoices.
    pub paid: Decimal,
    /// Sum over SENT and OVERDUE invoices.
    pub outstanding: Decimal,
}

/// Payload for `GET /dashboard/admin`.
#[derive(Debug, Serialize)]
pub struct AdminOverview {
    pub total_projects: usize,
    /// Projects currently IN_PROGRESS.
    pub active_projects: usize,
    pub total_clients: usize,
    pub invoices: InvoiceTotals,
}

/// One project with its milestone progress, for the client dashboard.
#[derive(Debug, Serialize)]
pub struct ProjectProgressItem {
    #[serde(flatten)]
    pub project: ProjectListItem,
    pub completed_milestones: usize,
    pub total_milestones: usize,
    /// Rounded percentage; 0 when the project has no milestones.
    pub progress_pct: u8,
}

/// Payload for `GET /dashboard/client`.
#[derive(Debug, Serialize)]
pub struct ClientOverview {
    pub projects: Vec<ProjectProgressItem>,
    pub invoices: InvoiceTotals,
}

fn invoice_totals(invoices: &[InvoiceListItem]) -> InvoiceTotals {
    let amounts_with_status = || invoices.iter().map(|i| (&i.amount, i.status));
    InvoiceTotals {
        invoiced: summary::invoice_total(invoices.iter().map(|i| &i.amount)),
        paid: summary::invoice_total_by_status(amounts_with_status(), InvoiceStatus::Paid),
        outstanding: summary::invoice_total_by_status(amounts_with_status(), InvoiceStatus::Sent)
            + summary::invoice_total_by_status(amounts_with_status(), InvoiceStatus::Overdue),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/admin
pub async fn admin_overview(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> AppResult<Json<ApiResponse<AdminOverview>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    let invoices = InvoiceRepo::list(&state.pool).await?;
    let clients =
        UserRepo::list_by_role(&state.pool, lollyshoppe_core::status::UserRole::Client).await?;

    let status_counts = summary::count_by_status(projects.iter().map(|p| p.status));

    Ok(Json(ApiResponse::new(AdminOverview {
        total_projects: projects.len(),
        active_projects: status_counts
            .get(&ProjectStatus::InProgress)
            .copied()
            .unwrap_or(0),
        total_clients: clients.len(),
        invoices: invoice_totals(&invoices),
    })))
}

/// GET /api/v1/dashboard/client
///
/// The caller's own projects with milestone progress, plus their invoice
/// totals. Available to any synced user; admins see their own (usually
/// empty) slice, matching the client-dashboard contract.
pub async fn client_overview(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<ApiResponse<ClientOverview>>> {
    let projects = ProjectRepo::list_by_client(&state.pool, user.id).await?;
    let invoices = InvoiceRepo::list_by_client(&state.pool, user.id).await?;

    let mut items = Vec::with_capacity(projects.len());
    for project in projects {
        let milestones = MilestoneRepo::list_by_project(&state.pool, project.id).await?;
        let total = milestones.len();
        let completed = milestones
            .iter()
            .filter(|m| m.completed_at.is_some())
            .count();
        items.push(ProjectProgressItem {
            project,
            completed_milestones: completed,
            total_milestones: total,
            progress_pct: summary::milestone_progress(completed, total),
        });
    }

    Ok(Json(ApiResponse::new(ClientOverview {
        projects: items,
        invoices: invoice_totals(&invoices),
    })))
}
