//! Route definitions for the `/slideshow` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::slideshow;
use crate::state::AppState;

/// Routes mounted at `/slideshow`.
///
/// ```text
/// POST   /        -> create_slideshow (queues a render job)
/// GET    /{id}    -> get_slideshow_job (status poll)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(slideshow::create_slideshow))
        .route("/{id}", get(slideshow::get_slideshow_job))
}
