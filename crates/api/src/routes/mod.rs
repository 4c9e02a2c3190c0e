pub mod albums;
pub mod health;
pub mod media;
pub mod slideshow;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /albums                        list, create
/// /albums/{id}                   get, update, delete
///
/// /media/upload                  multipart upload (POST)
/// /media/{id}                    get, delete
/// /media/{id}/file               raw bytes (GET)
/// /media/category/{category}     paginated category listing (GET)
/// /media/portrait                portrait shortcut (GET)
/// /media/stats/categories        per-category counts (GET)
///
/// /slideshow                     queue render job (POST)
/// /slideshow/{id}                status poll (GET)
/// ```
///
/// All routes require a Bearer token; `/health` lives at root level outside
/// this tree and is public.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/albums", albums::router())
        .nest("/media", media::router())
        .nest("/slideshow", slideshow::router())
}
