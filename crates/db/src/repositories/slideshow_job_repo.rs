//! Repository for the `slideshow_jobs` table.
//!
//! Status transitions are written by the background render task; the
//! `failed` update deliberately leaves `progress` untouched so a fetch
//! shows how far the job got before it died.

use sqlx::types::Json;
use sqlx::PgPool;

use omoide_core::types::DbId;

use crate::models::slideshow_job::{status, SlideshowJob, SlideshowParams};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, album_id, params, status, progress, result_key, error_msg, created_at, updated_at";

/// Provides creation and status updates for slideshow jobs.
pub struct SlideshowJobRepo;

impl SlideshowJobRepo {
    /// Insert a new job in `queued` status with progress 0.
    pub async fn create(
        pool: &PgPool,
        album_id: DbId,
        params: &SlideshowParams,
    ) -> Result<SlideshowJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO slideshow_jobs (album_id, params)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SlideshowJob>(&query)
            .bind(album_id)
            .bind(Json(params))
            .fetch_one(pool)
            .await
    }

    /// Find a job by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SlideshowJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slideshow_jobs WHERE id = $1");
        sqlx::query_as::<_, SlideshowJob>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a job as processing with the given progress.
    pub async fn mark_processing(
        pool: &PgPool,
        id: DbId,
        progress: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE slideshow_jobs
             SET status = $2, progress = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(status::PROCESSING)
        .bind(progress)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a job as done: progress 100, result key set.
    pub async fn mark_done(pool: &PgPool, id: DbId, result_key: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE slideshow_jobs
             SET status = $2, progress = 100, result_key = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(status::DONE)
        .bind(result_key)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a job as failed, recording the error text. Progress is left at
    /// whatever value it last held.
    pub async fn mark_failed(pool: &PgPool, id: DbId, error_msg: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE slideshow_jobs
             SET status = $2, error_msg = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(status::FAILED)
        .bind(error_msg)
        .execute(pool)
        .await?;
        Ok(())
    }
}
