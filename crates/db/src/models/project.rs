//! Project entity model, form DTO, and joined read models.

use chrono::NaiveDate;
use lollyshoppe_core::status::ProjectStatus;
use lollyshoppe_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::models::de;
use crate::models::deliverable::Deliverable;
use crate::models::milestone::Milestone;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub budget: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub client_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated form payload, used for create and full-replace update alike.
///
/// Optional fields submitted as empty strings arrive here as `None`; an
/// update with an absent optional field clears the stored value.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectForm {
    #[validate(length(min = 3, max = 100, message = "Title must be 3-100 characters"))]
    pub title: String,
    #[validate(length(min = 10, max = 5000, message = "Description must be 10-5000 characters"))]
    pub description: String,
    pub status: ProjectStatus,
    #[serde(default, deserialize_with = "de::blank_as_none")]
    #[validate(custom(function = non_negative))]
    pub budget: Option<Decimal>,
    #[serde(default, deserialize_with = "de::blank_as_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::blank_as_none")]
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Client is required"))]
    pub client_id: DbId,
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("non_negative")
            .with_message("Budget must not be negative".into()));
    }
    Ok(())
}

/// Project row joined with its client and child counts, for list views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectListItem {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub budget: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub client_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub client_email: String,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub milestone_count: i64,
    pub deliverable_count: i64,
}

/// Full project detail: the row plus its ordered children, as the detail
/// view consumes it. Assembled in the handler from three fetches.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub client_email: String,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub milestones: Vec<Milestone>,
    pub deliverables: Vec<Deliverable>,
}
