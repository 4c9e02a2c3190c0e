//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, provider, provider_id, name, avatar_url, created_at, updated_at";

/// Provides lookup and just-in-time provisioning for users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by `(provider, provider_id)`, creating the row if it does
    /// not exist. A fresh display name / avatar from the identity provider
    /// overwrites the stored one.
    pub async fn find_or_create(
        pool: &PgPool,
        provider: &str,
        provider_id: &str,
        name: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (provider, provider_id, name, avatar_url)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_users_provider_subject
             DO UPDATE SET
                name = COALESCE(EXCLUDED.name, users.name),
                avatar_url = COALESCE(EXCLUDED.avatar_url, users.avatar_url),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(provider)
            .bind(provider_id)
            .bind(name)
            .bind(avatar_url)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: omoide_core::types::DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
