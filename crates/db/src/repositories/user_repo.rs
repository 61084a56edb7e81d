//! Repository for the `users` table.

use lollyshoppe_core::status::UserRole;
use lollyshoppe_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{SyncUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, external_id, email, first_name, last_name, role, created_at, updated_at";

/// Provides lookup and identity-sync operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by the identity provider's subject id.
    pub async fn find_by_external_id(
        pool: &PgPool,
        external_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE external_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(external_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve an external identity to the local user, creating one with
    /// role CLIENT on first sight.
    ///
    /// An existing row is returned unchanged — the sync path never rewrites
    /// email, names, or role. The insert races safely against concurrent
    /// first-time syncs: `ON CONFLICT DO NOTHING` on the `uq_users_external_id`
    /// constraint means the loser re-selects the winner's row, so at most
    /// one row ever exists per subject id.
    pub async fn find_or_create(pool: &PgPool, input: &SyncUser) -> Result<User, sqlx::Error> {
        if let Some(user) = Self::find_by_external_id(pool, &input.external_id).await? {
            return Ok(user);
        }

        let insert = format!(
            "INSERT INTO users (external_id, email, first_name, last_name)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (external_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, User>(&insert)
            .bind(&input.external_id)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(user) => Ok(user),
            // Lost the race to a concurrent first sync; the row exists now.
            None => {
                let select = format!("SELECT {COLUMNS} FROM users WHERE external_id = $1");
                sqlx::query_as::<_, User>(&select)
                    .bind(&input.external_id)
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// List users with a given role, most recently created first.
    pub async fn list_by_role(pool: &PgPool, role: UserRole) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE role = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query)
            .bind(role)
            .fetch_all(pool)
            .await
    }
}
