//! Repository for the `invoices` table.

use lollyshoppe_core::status::InvoiceStatus;
use lollyshoppe_core::types::DbId;
use sqlx::PgPool;

use crate::models::invoice::{Invoice, InvoiceForm, InvoiceListItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, invoice_number, amount, status, due_date, paid_at, client_id, \
     project_id, created_at, updated_at";

/// Columns for the joined list/detail view.
const LIST_COLUMNS: &str = "i.id, i.invoice_number, i.amount, i.status, i.due_date, i.paid_at, \
     i.client_id, i.project_id, i.created_at, i.updated_at, \
     u.email AS client_email, u.first_name AS client_first_name, u.last_name AS client_last_name, \
     p.title AS project_title";

/// Provides CRUD and transition operations for invoices.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert a new invoice, returning the created row.
    pub async fn create(pool: &PgPool, input: &InvoiceForm) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices (invoice_number, amount, status, due_date, client_id, project_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(&input.invoice_number)
            .bind(input.amount)
            .bind(input.status)
            .bind(input.due_date)
            .bind(input.client_id)
            .bind(input.project_id)
            .fetch_one(pool)
            .await
    }

    /// Find an invoice by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an invoice with its client and project display references.
    pub async fn find_with_refs(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InvoiceListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM invoices i
             JOIN users u ON u.id = i.client_id
             LEFT JOIN projects p ON p.id = i.project_id
             WHERE i.id = $1"
        );
        sqlx::query_as::<_, InvoiceListItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all invoices with display references, most recently created
    /// first.
    pub async fn list(pool: &PgPool) -> Result<Vec<InvoiceListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM invoices i
             JOIN users u ON u.id = i.client_id
             LEFT JOIN projects p ON p.id = i.project_id
             ORDER BY i.created_at DESC"
        );
        sqlx::query_as::<_, InvoiceListItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// List one client's invoices, most recently created first.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<InvoiceListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM invoices i
             JOIN users u ON u.id = i.client_id
             LEFT JOIN projects p ON p.id = i.project_id
             WHERE i.client_id = $1
             ORDER BY i.created_at DESC"
        );
        sqlx::query_as::<_, InvoiceListItem>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Full-field replace of an invoice. `paid_at` is untouched; only the
    /// mark-paid transition writes it.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &InvoiceForm,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET
                invoice_number = $2,
                amount = $3,
                status = $4,
                due_date = $5,
                client_id = $6,
                project_id = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(&input.invoice_number)
            .bind(input.amount)
            .bind(input.status)
            .bind(input.due_date)
            .bind(input.client_id)
            .bind(input.project_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an invoice by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set status to PAID and stamp `paid_at` with the current time,
    /// regardless of the invoice's prior status. Repeated calls keep the
    /// status at PAID and advance the timestamp.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn mark_paid(pool: &PgPool, id: DbId) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET status = $2, paid_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(InvoiceStatus::Paid)
            .fetch_optional(pool)
            .await
    }
}
