//! Handlers for the `/albums` resource.
//!
//! All endpoints require authentication via [`AuthUser`]. Reads are allowed
//! for the owner or on public albums; writes are owner-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use omoide_core::error::CoreError;
use omoide_core::types::DbId;
use omoide_db::models::album::{Album, CreateAlbum, UpdateAlbum};
use omoide_db::models::media::Media;
use omoide_db::repositories::{AlbumRepo, MediaRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch an album and verify the caller owns it.
///
/// Returns `NotFound` if the album does not exist, `Forbidden` if the
/// caller is not the owner. `action` is used in the error message.
pub(crate) async fn find_and_require_owner(
    pool: &sqlx::PgPool,
    album_id: DbId,
    auth: &AuthUser,
    action: &str,
) -> AppResult<Album> {
    let album = AlbumRepo::find_by_id(pool, album_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Album",
            id: album_id,
        }))?;

    if album.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Cannot {action} another user's album"
        ))));
    }

    Ok(album)
}

/// Album detail payload: the album plus its media, newest first.
#[derive(Debug, Serialize)]
pub struct AlbumDetail {
    #[serde(flatten)]
    pub album: Album,
    pub media: Vec<Media>,
}

// ---------------------------------------------------------------------------
// List / Create
// ---------------------------------------------------------------------------

/// GET /api/v1/albums
///
/// List the caller's albums, newest first.
pub async fn list_albums(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let albums = AlbumRepo::list_by_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: albums }))
}

/// POST /api/v1/albums
///
/// Create an album. Title is required. Returns 201 with the created row.
pub async fn create_album(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAlbum>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title required".into(),
        )));
    }

    let album = AlbumRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(album_id = album.id, user_id = auth.user_id, "Album created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: album })))
}

// ---------------------------------------------------------------------------
// Get / Update / Delete
// ---------------------------------------------------------------------------

/// GET /api/v1/albums/{id}
///
/// Get an album with its media. Allowed for the owner or when the album
/// is public.
pub async fn get_album(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(album_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let album = AlbumRepo::find_by_id(&state.pool, album_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Album",
            id: album_id,
        }))?;

    if !album.viewable_by(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Album is private".into(),
        )));
    }

    let media = MediaRepo::list_by_album(&state.pool, album_id).await?;

    Ok(Json(DataResponse {
        data: AlbumDetail { album, media },
    }))
}

/// PUT /api/v1/albums/{id}
///
/// Update title/description/visibility. Owner only.
pub async fn update_album(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(album_id): Path<DbId>,
    Json(input): Json<UpdateAlbum>,
) -> AppResult<impl IntoResponse> {
    find_and_require_owner(&state.pool, album_id, &auth, "update").await?;

    let updated = AlbumRepo::update(&state.pool, album_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Album",
            id: album_id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/albums/{id}
///
/// Delete an album and all of its media. Owner only. Returns 204.
pub async fn delete_album(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(album_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_and_require_owner(&state.pool, album_id, &auth, "delete").await?;

    AlbumRepo::delete_with_media(&state.pool, album_id).await?;

    tracing::info!(album_id, user_id = auth.user_id, "Album deleted");

    Ok(StatusCode::NO_CONTENT)
}
