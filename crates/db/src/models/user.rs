//! User entity model and identity-sync DTO.

use lollyshoppe_core::status::UserRole;
use lollyshoppe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row from the `users` table.
///
/// `external_id` is the subject id asserted by the identity provider;
/// exactly one local row exists per subject.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub external_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Identity attributes asserted by the provider, applied on first sync only.
///
/// Subsequent syncs return the stored row unchanged; in particular the sync
/// path never rewrites email, names, or role.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncUser {
    pub external_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
