//! Repository for the `media` table.

use sqlx::types::Json;
use sqlx::PgPool;

use omoide_core::types::DbId;

use crate::models::media::{CategoryCount, CreateMedia, Media};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, album_id, owner_id, storage_key, mime, width, height, caption, \
    tags, category, confidence, colors, analyzed, created_at, updated_at";

/// Provides CRUD and category queries for media.
pub struct MediaRepo;

impl MediaRepo {
    /// Insert a new media row, returning the created record.
    pub async fn create(pool: &PgPool, input: &CreateMedia) -> Result<Media, sqlx::Error> {
        let query = format!(
            "INSERT INTO media (album_id, owner_id, storage_key, mime, width, height,
                                caption, tags, category, confidence, colors, analyzed)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(input.album_id)
            .bind(input.owner_id)
            .bind(&input.storage_key)
            .bind(&input.mime)
            .bind(input.width)
            .bind(input.height)
            .bind(&input.caption)
            .bind(Json(&input.tags))
            .bind(&input.category)
            .bind(input.confidence)
            .bind(input.colors.as_ref().map(Json))
            .bind(input.analyzed)
            .fetch_one(pool)
            .await
    }

    /// Find a media row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE id = $1");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all media in an album, newest first.
    pub async fn list_by_album(pool: &PgPool, album_id: DbId) -> Result<Vec<Media>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media WHERE album_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(album_id)
            .fetch_all(pool)
            .await
    }

    /// List a user's analyzed media in a given category, newest first.
    pub async fn list_by_category(
        pool: &PgPool,
        owner_id: DbId,
        category: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Media>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media
             WHERE owner_id = $1 AND category = $2
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(owner_id)
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// `(category, count)` pairs for a user's analyzed media, descending by
    /// count.
    pub async fn category_stats(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<CategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryCount>(
            "SELECT category, COUNT(*) AS count FROM media
             WHERE owner_id = $1 AND category IS NOT NULL
             GROUP BY category
             ORDER BY count DESC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    /// Hard-delete a media row by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
