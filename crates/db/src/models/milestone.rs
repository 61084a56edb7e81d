//! Milestone entity model and DTOs.

use chrono::NaiveDate;
use lollyshoppe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::de;

/// A milestone row from the `milestones` table.
///
/// A non-null `completed_at` is what "completed" means; there is no
/// separate boolean. `sort_order` sequences display within one project
/// only and carries no cross-project meaning.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Milestone {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<Timestamp>,
    pub sort_order: i32,
    pub project_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated form payload for create and full-replace update.
///
/// `project_id` is overridden from the URL path by the handler, so a body
/// naming a different project cannot re-parent a milestone.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MilestoneForm {
    #[validate(length(min = 3, max = 100, message = "Title must be 3-100 characters"))]
    pub title: String,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::blank_as_none")]
    pub due_date: Option<NaiveDate>,
    #[validate(range(min = 0, message = "Order must not be negative"))]
    pub sort_order: i32,
    #[serde(default)]
    pub project_id: DbId,
}

/// Payload for the reorder operation: milestone ids in their new display
/// order. Every id must belong to the addressed project or the whole batch
/// is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderMilestones {
    pub milestone_ids: Vec<DbId>,
}
