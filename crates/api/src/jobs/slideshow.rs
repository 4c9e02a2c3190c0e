//! Slideshow render unit of work.
//!
//! The render itself is simulated: a real deployment would spawn ffmpeg
//! over the album's media here. The flow around it is the real contract:
//! `processing` at progress 10, a storage write under a deterministic key,
//! then `done` at progress 100 -- or `failed` with the error text and the
//! progress left wherever it was.

use std::sync::Arc;

use omoide_core::types::DbId;
use omoide_db::repositories::SlideshowJobRepo;
use omoide_db::DbPool;
use omoide_storage::ObjectStorage;

use crate::jobs::registry::{JobFuture, JobRegistry};

/// Placeholder MP4 payload standing in for ffmpeg output.
const PLACEHOLDER_MP4: &[u8] = b"000000";

/// Storage key for a rendered slideshow.
pub fn result_key(album_id: DbId, job_id: DbId) -> String {
    format!("slideshows/{album_id}/{job_id}.mp4")
}

/// Build the render future for a job. Registered with the [`JobRegistry`]
/// and executed later under its concurrency gate.
pub fn render_work(
    pool: DbPool,
    storage: Arc<dyn ObjectStorage>,
    album_id: DbId,
    job_id: DbId,
) -> JobFuture {
    Box::pin(async move {
        SlideshowJobRepo::mark_processing(&pool, job_id, 10).await?;

        // Simulated rendering: write a stub payload where the video would go.
        let key = result_key(album_id, job_id);
        let stored_key = storage.put(PLACEHOLDER_MP4, &key).await?;

        SlideshowJobRepo::mark_done(&pool, job_id, &stored_key).await?;

        tracing::info!(job_id, album_id, result_key = %stored_key, "Slideshow job completed");
        Ok(())
    })
}

/// Fire-and-forget execution of a registered job.
///
/// Detaches a task that drives [`JobRegistry::run`] and records any failure
/// on the persisted row, so the outcome is always observable via a later
/// fetch even though the creating request has long since returned.
pub fn spawn_run(registry: Arc<JobRegistry>, pool: DbPool, job_id: DbId) {
    tokio::spawn(async move {
        if let Err(err) = registry.run(job_id).await {
            tracing::warn!(job_id, error = %err, "Slideshow job failed");
            if let Err(db_err) = SlideshowJobRepo::mark_failed(&pool, job_id, &err.to_string()).await
            {
                tracing::error!(job_id, error = %db_err, "Could not record job failure");
            }
        }
    });
}
