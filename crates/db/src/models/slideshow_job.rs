//! Slideshow job entity model.
//!
//! Lifecycle: `queued -> processing -> done | failed`. Both end states are
//! terminal; there is no retry or cancellation. Rows are mutated in place
//! by the background render task as it progresses.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use omoide_core::types::{DbId, Timestamp};

/// Job status values as stored in the `status` column.
pub mod status {
    pub const QUEUED: &str = "queued";
    pub const PROCESSING: &str = "processing";
    pub const DONE: &str = "done";
    pub const FAILED: &str = "failed";
}

/// Render parameters serialized into the `params` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideshowParams {
    /// Transition style between frames (default `"crossfade"`).
    pub transition: String,
    /// Output frame rate (default 30).
    pub fps: i32,
}

impl Default for SlideshowParams {
    fn default() -> Self {
        Self {
            transition: "crossfade".to_string(),
            fps: 30,
        }
    }
}

/// A row from the `slideshow_jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SlideshowJob {
    pub id: DbId,
    pub album_id: DbId,
    pub params: Json<SlideshowParams>,
    pub status: String,
    /// 0..=100; monotonically non-decreasing while the job runs.
    pub progress: i32,
    pub result_key: Option<String>,
    pub error_msg: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
