//! Media entity model and creation DTO.
//!
//! Media rows are written once at ingestion and never mutated afterwards
//! (delete is hard and immediate). The inference fields (`category`,
//! `confidence`, `colors`, `width`, `height`) are set only when
//! `analyzed = true`.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use omoide_core::types::{DbId, Timestamp};

/// A row from the `media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Media {
    pub id: DbId,
    pub album_id: DbId,
    pub owner_id: DbId,
    /// Backend-prefixed storage key (e.g. `local:albums/1/ab.jpg`).
    pub storage_key: String,
    pub mime: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub caption: Option<String>,
    /// Order-irrelevant set of tag strings (user-supplied plus inferred).
    pub tags: Json<Vec<String>>,
    pub category: Option<String>,
    /// Inference confidence, 0.0..=1.0.
    pub confidence: Option<f64>,
    /// Up to five `#rrggbb` palette entries, dominant first.
    pub colors: Option<Json<Vec<String>>>,
    pub analyzed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Everything needed to insert a media row. Built by the ingestion flow
/// after the storage write and (optional) image analysis.
#[derive(Debug, Clone)]
pub struct CreateMedia {
    pub album_id: DbId,
    pub owner_id: DbId,
    pub storage_key: String,
    pub mime: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub caption: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub confidence: Option<f64>,
    pub colors: Option<Vec<String>>,
    pub analyzed: bool,
}

/// One `(category, count)` aggregate row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}
