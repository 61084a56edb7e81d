//! Route definitions for the `/invoices` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::invoices;
use crate::state::AppState;

/// Routes mounted at `/invoices`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// POST   /{id}/mark-paid  -> mark_paid
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(invoices::list).post(invoices::create))
        .route(
            "/{id}",
            get(invoices::get_by_id)
                .put(invoices::update)
                .delete(invoices::delete),
        )
        .route("/{id}/mark-paid", post(invoices::mark_paid))
}
