//! Role and status enums backed by PostgreSQL enum types.
//!
//! Each enum maps to a database enum created in the `lollyshoppe-db`
//! migrations and serializes in SCREAMING_SNAKE_CASE on the wire, so the
//! stored value, the JSON value, and the Rust variant always agree.

use serde::{Deserialize, Serialize};

/// Account role. New accounts default to `Client`; only a manual admin
/// promotion changes it (never the sync path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Client,
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Pending,
    InProgress,
    Review,
    Completed,
    Cancelled,
}

/// Invoice lifecycle status. `Paid` is normally reached through the
/// mark-paid transition, which also stamps `paid_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invoice_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}
