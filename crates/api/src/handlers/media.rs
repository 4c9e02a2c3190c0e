//! Handlers for the `/media` resource: upload (ingestion flow), fetch,
//! raw-file serving, delete, and category queries.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use omoide_core::analysis::{analyze_image, AnalysisOutcome};
use omoide_core::error::CoreError;
use omoide_core::tags::{merge_tags, parse_tags};
use omoide_core::types::DbId;
use omoide_db::models::media::{CreateMedia, Media};
use omoide_db::repositories::{AlbumRepo, MediaRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::albums::find_and_require_owner;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// MIME prefix that triggers the categorization heuristic.
const IMAGE_MIME_PREFIX: &str = "image/";

/// Fallback extension for files uploaded without one.
const DEFAULT_EXT: &str = ".bin";

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// A media record plus its resolved access URL.
#[derive(Debug, Serialize)]
pub struct MediaWithUrl {
    #[serde(flatten)]
    pub media: Media,
    pub url: String,
}

impl From<Media> for MediaWithUrl {
    fn from(media: Media) -> Self {
        let url = omoide_storage::resolve_url(&media.storage_key);
        Self { media, url }
    }
}

/// Pagination query for category listings.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

/// The parts of a multipart upload request, collected before validation.
#[derive(Default)]
struct UploadParts {
    album_id: Option<DbId>,
    caption: Option<String>,
    tags: Option<String>,
    file: Option<UploadedFile>,
}

struct UploadedFile {
    filename: String,
    mime: String,
    bytes: Vec<u8>,
}

async fn collect_upload_parts(mut multipart: Multipart) -> AppResult<UploadParts> {
    let mut parts = UploadParts::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Could not read file field: {e}")))?
                    .to_vec();
                parts.file = Some(UploadedFile {
                    filename,
                    mime,
                    bytes,
                });
            }
            "albumId" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Could not read albumId: {e}")))?;
                let id = text.trim().parse::<DbId>().map_err(|_| {
                    AppError::Core(CoreError::Validation("albumId must be numeric".into()))
                })?;
                parts.album_id = Some(id);
            }
            "caption" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Could not read caption: {e}")))?;
                if !text.is_empty() {
                    parts.caption = Some(text);
                }
            }
            "tags" => {
                parts.tags = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Could not read tags: {e}")))?,
                );
            }
            _ => {}
        }
    }

    Ok(parts)
}

/// Derive the storage key for an upload: `{album_id}/{uuid}{ext}`, keeping
/// the original extension (lowercased) and defaulting to `.bin`.
fn storage_key_for(album_id: DbId, filename: &str) -> String {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_else(|| DEFAULT_EXT.to_string());
    format!("{album_id}/{}{ext}", Uuid::new_v4())
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

/// POST /api/v1/media/upload
///
/// Ingest one file into an album (multipart fields: `file`, `albumId`,
/// optional `caption`, optional `tags`). For image MIME types the
/// categorization heuristic runs and its suggested tags are merged into the
/// user-supplied ones; a heuristic failure degrades silently and never
/// fails the upload. Returns 201 with the record plus its access URL.
pub async fn upload_media(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let parts = collect_upload_parts(multipart).await?;

    let album_id = parts.album_id.ok_or(AppError::Core(CoreError::Validation(
        "albumId required".into(),
    )))?;
    let file = parts.file.ok_or(AppError::Core(CoreError::Validation(
        "file required".into(),
    )))?;

    // Ownership invariant: media owner equals album owner, checked here.
    let album = find_and_require_owner(&state.pool, album_id, &auth, "upload to").await?;

    let key = storage_key_for(album.id, &file.filename);
    let storage_key = state.storage.put(&file.bytes, &key).await?;

    let user_tags = parts.tags.as_deref().map(parse_tags).unwrap_or_default();

    let mut create = CreateMedia {
        album_id: album.id,
        owner_id: auth.user_id,
        storage_key,
        mime: file.mime.clone(),
        width: None,
        height: None,
        caption: parts.caption,
        tags: user_tags,
        category: None,
        confidence: None,
        colors: None,
        analyzed: false,
    };

    if file.mime.starts_with(IMAGE_MIME_PREFIX) {
        let bytes = file.bytes;
        let filename = file.filename;
        // Decoding is CPU-bound; keep it off the async workers.
        let outcome =
            tokio::task::spawn_blocking(move || analyze_image(&bytes, &filename)).await;

        match outcome {
            Ok(AnalysisOutcome::Analyzed(report)) => {
                create.tags = merge_tags(create.tags, &report.suggested_tags);
                create.width = i32::try_from(report.width).ok();
                create.height = i32::try_from(report.height).ok();
                create.category = Some(report.category);
                create.confidence = Some(report.confidence);
                create.colors = Some(report.colors);
                create.analyzed = true;
            }
            Ok(AnalysisOutcome::Degraded(_)) => {
                // User tags stand as given; inference fields stay unset.
                tracing::debug!(album_id, "Image analysis degraded to fallback");
            }
            Err(join_err) => {
                tracing::warn!(album_id, error = %join_err, "Image analysis task failed");
            }
        }
    }

    let media = MediaRepo::create(&state.pool, &create).await?;

    tracing::info!(
        media_id = media.id,
        album_id,
        user_id = auth.user_id,
        analyzed = media.analyzed,
        "Media ingested",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: MediaWithUrl::from(media),
        }),
    ))
}

// ---------------------------------------------------------------------------
// Get / file / delete
// ---------------------------------------------------------------------------

/// Fetch a media row and verify the caller may view it (owner, or the
/// owning album is public).
async fn find_and_authorize_view(
    pool: &sqlx::PgPool,
    media_id: DbId,
    auth: &AuthUser,
) -> AppResult<Media> {
    let media = MediaRepo::find_by_id(pool, media_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Media",
            id: media_id,
        }))?;

    if media.owner_id != auth.user_id {
        let album = AlbumRepo::find_by_id(pool, media.album_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Album",
                id: media.album_id,
            }))?;
        if !album.is_public {
            return Err(AppError::Core(CoreError::Forbidden(
                "Media belongs to a private album".into(),
            )));
        }
    }

    Ok(media)
}

/// GET /api/v1/media/{id}
pub async fn get_media(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(media_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let media = find_and_authorize_view(&state.pool, media_id, &auth).await?;
    Ok(Json(DataResponse {
        data: MediaWithUrl::from(media),
    }))
}

/// GET /api/v1/media/{id}/file
///
/// Stream the stored bytes with the recorded MIME type. Media files are
/// immutable, so clients may cache aggressively.
pub async fn get_media_file(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(media_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let media = find_and_authorize_view(&state.pool, media_id, &auth).await?;
    let bytes = state.storage.get(&media.storage_key).await?;

    Ok((
        [
            (header::CONTENT_TYPE, media.mime),
            (
                header::CACHE_CONTROL,
                "public, max-age=31536000".to_string(),
            ),
        ],
        bytes,
    ))
}

/// DELETE /api/v1/media/{id}
///
/// Hard-delete a media record. Owner only. The DB row goes first; the
/// storage object removal is best-effort (an orphaned file is preferable
/// to a dangling record).
pub async fn delete_media(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(media_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let media = MediaRepo::find_by_id(&state.pool, media_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Media",
            id: media_id,
        }))?;

    if media.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot delete another user's media".into(),
        )));
    }

    MediaRepo::delete(&state.pool, media_id).await?;

    if let Err(e) = state.storage.delete(&media.storage_key).await {
        tracing::warn!(media_id, storage_key = %media.storage_key, error = %e,
            "Stored object not removed");
    }

    tracing::info!(media_id, user_id = auth.user_id, "Media deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Category queries
// ---------------------------------------------------------------------------

/// GET /api/v1/media/category/{category}
///
/// The caller's analyzed media in one category, newest first, paginated.
pub async fn list_by_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(page): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let media =
        MediaRepo::list_by_category(&state.pool, auth.user_id, &category, page.limit, page.offset)
            .await?;
    let data: Vec<MediaWithUrl> = media.into_iter().map(MediaWithUrl::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/media/portrait
///
/// Shortcut for the portrait category (used by the photo-picker UI).
pub async fn list_portraits(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let media = MediaRepo::list_by_category(
        &state.pool,
        auth.user_id,
        omoide_core::analysis::CATEGORY_PORTRAIT,
        page.limit,
        page.offset,
    )
    .await?;
    let data: Vec<MediaWithUrl> = media.into_iter().map(MediaWithUrl::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/media/stats/categories
///
/// `(category, count)` pairs for the caller's analyzed media, descending
/// by count.
pub async fn category_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = MediaRepo::category_stats(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: stats }))
}
