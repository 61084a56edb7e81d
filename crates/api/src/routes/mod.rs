pub mod auth;
pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod projects;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/sync                                       identity sync (POST)
/// /auth/me                                         current user (GET)
///
/// /users                                           list users (admin only)
/// /users/clients                                   list CLIENT accounts (admin only)
///
/// /projects                                        list, create
/// /projects/{id}                                   get detail, update, delete
/// /projects/{project_id}/milestones                list, create
/// /projects/{project_id}/milestones/reorder        reorder batch (POST)
/// /projects/{project_id}/milestones/{id}           get, update, delete
/// /projects/{project_id}/milestones/{id}/toggle-complete  toggle (POST)
/// /projects/{project_id}/deliverables              list, create
/// /projects/{project_id}/deliverables/{id}         get, update, delete
///
/// /invoices                                        list, create
/// /invoices/{id}                                   get, update, delete
/// /invoices/{id}/mark-paid                         mark paid (POST)
///
/// /dashboard/admin                                 admin overview (GET)
/// /dashboard/client                                client overview (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Identity sync and current-user lookup.
        .nest("/auth", auth::router())
        // Admin user listings.
        .nest("/users", users::router())
        // Projects (also nests milestones and deliverables).
        .nest("/projects", projects::router())
        // Invoices and the mark-paid transition.
        .nest("/invoices", invoices::router())
        // Derived overview figures.
        .nest("/dashboard", dashboard::router())
}
