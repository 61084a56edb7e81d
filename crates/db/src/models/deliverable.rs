//! Deliverable entity model and DTO.

use lollyshoppe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::de;

/// A deliverable row from the `deliverables` table.
///
/// `file_url` is a bare external link; no file storage is involved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deliverable {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub project_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated form payload for create and full-replace update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeliverableForm {
    #[validate(length(min = 3, max = 100, message = "Title must be 3-100 characters"))]
    pub title: String,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::empty_string_as_none")]
    #[validate(url(message = "Must be a valid URL"))]
    pub file_url: Option<String>,
    #[serde(default)]
    pub project_id: DbId,
}
