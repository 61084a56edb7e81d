//! Invoice entity model, form DTO, and joined read model.

use chrono::NaiveDate;
use lollyshoppe_core::status::InvoiceStatus;
use lollyshoppe_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::de;

/// An invoice row from the `invoices` table.
///
/// `project_id` is a weak reference for display only; the invoice survives
/// deletion of its project. `paid_at` is written exclusively by the
/// mark-paid transition.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub invoice_number: String,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub due_date: Option<NaiveDate>,
    pub paid_at: Option<Timestamp>,
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated form payload for create and full-replace update.
///
/// Invoice numbers are intended to be human-unique but the schema does not
/// enforce it. Consistency between `client_id` and a linked project's
/// client is deliberately not checked.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceForm {
    #[validate(length(min = 1, message = "Invoice number is required"))]
    pub invoice_number: String,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    #[serde(default, deserialize_with = "de::blank_as_none")]
    pub due_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Client is required"))]
    pub client_id: DbId,
    #[serde(default, deserialize_with = "de::blank_as_none")]
    pub project_id: Option<DbId>,
}

/// Invoice row joined with client and project display references, for list
/// and detail views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvoiceListItem {
    pub id: DbId,
    pub invoice_number: String,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub due_date: Option<NaiveDate>,
    pub paid_at: Option<Timestamp>,
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub client_email: String,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub project_title: Option<String>,
}
