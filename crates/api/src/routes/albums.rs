//! Route definitions for the `/albums` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::albums;
use crate::state::AppState;

/// Routes mounted at `/albums`.
///
/// ```text
/// GET    /        -> list_albums (caller's own)
/// POST   /        -> create_album
/// GET    /{id}    -> get_album (owner or public; includes media)
/// PUT    /{id}    -> update_album (owner only)
/// DELETE /{id}    -> delete_album (owner only; removes media rows first)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(albums::list_albums).post(albums::create_album))
        .route(
            "/{id}",
            get(albums::get_album)
                .put(albums::update_album)
                .delete(albums::delete_album),
        )
}
