//! Route definitions for the `/media` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`.
///
/// ```text
/// POST   /upload                 -> upload_media (multipart)
/// GET    /portrait               -> list_portraits
/// GET    /stats/categories       -> category_stats
/// GET    /category/{category}    -> list_by_category
/// GET    /{id}                   -> get_media
/// DELETE /{id}                   -> delete_media
/// GET    /{id}/file              -> get_media_file (raw bytes)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(media::upload_media))
        .route("/portrait", get(media::list_portraits))
        .route("/stats/categories", get(media::category_stats))
        .route("/category/{category}", get(media::list_by_category))
        .route("/{id}", get(media::get_media).delete(media::delete_media))
        .route("/{id}/file", get(media::get_media_file))
}
