//! Handlers for the `/slideshow` resource: job creation and status polling.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use omoide_core::error::CoreError;
use omoide_core::types::DbId;
use omoide_db::models::slideshow_job::SlideshowParams;
use omoide_db::repositories::{AlbumRepo, SlideshowJobRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::albums::find_and_require_owner;
use crate::jobs::slideshow::{render_work, spawn_run};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSlideshowRequest {
    #[serde(alias = "albumId")]
    pub album_id: DbId,
    pub transition: Option<String>,
    pub fps: Option<i32>,
}

/// POST /api/v1/slideshow
///
/// Create a render job for an album the caller owns. The job row is
/// persisted in `queued` status and the render work is registered and
/// kicked off before the response returns, so a poll that races the
/// worker still observes a valid status.
pub async fn create_slideshow(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateSlideshowRequest>,
) -> AppResult<impl IntoResponse> {
    let album = find_and_require_owner(&state.pool, req.album_id, &auth, "render").await?;

    let mut params = SlideshowParams::default();
    if let Some(transition) = req.transition {
        params.transition = transition;
    }
    if let Some(fps) = req.fps {
        params.fps = fps;
    }

    let job = SlideshowJobRepo::create(&state.pool, album.id, &params).await?;

    state
        .jobs
        .register(
            job.id,
            render_work(state.pool.clone(), state.storage.clone(), album.id, job.id),
        )
        .await;
    spawn_run(state.jobs.clone(), state.pool.clone(), job.id);

    tracing::info!(job_id = job.id, album_id = album.id, "Slideshow job queued");

    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

/// GET /api/v1/slideshow/{id}
///
/// Poll a job's status. Visible to the album owner or, for public albums,
/// anyone authenticated.
pub async fn get_slideshow_job(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = SlideshowJobRepo::find_by_id(&state.pool, job_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SlideshowJob",
            id: job_id,
        }))?;

    let album = AlbumRepo::find_by_id(&state.pool, job.album_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Album",
            id: job.album_id,
        }))?;

    if !album.viewable_by(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Job belongs to a private album".into(),
        )));
    }

    Ok(Json(DataResponse { data: job }))
}
