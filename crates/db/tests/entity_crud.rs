//! Integration tests for the repository layer against a real database:
//! - User provisioning upsert
//! - Album CRUD and the media-first cascade delete
//! - Media creation, category listing, and category stats ordering
//! - Slideshow job status transitions

use sqlx::PgPool;

use omoide_db::models::album::{CreateAlbum, UpdateAlbum};
use omoide_db::models::media::CreateMedia;
use omoide_db::models::slideshow_job::{status, SlideshowParams};
use omoide_db::repositories::{AlbumRepo, MediaRepo, SlideshowJobRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, subject: &str) -> i64 {
    UserRepo::find_or_create(pool, "line", subject, Some("Demo User"), None)
        .await
        .expect("seed user")
        .id
}

fn new_album(title: &str) -> CreateAlbum {
    CreateAlbum {
        title: title.to_string(),
        description: None,
        is_public: None,
    }
}

fn new_media(album_id: i64, owner_id: i64, category: Option<&str>) -> CreateMedia {
    CreateMedia {
        album_id,
        owner_id,
        storage_key: format!("local:{album_id}/test.jpg"),
        mime: "image/jpeg".to_string(),
        width: Some(100),
        height: Some(100),
        caption: None,
        tags: vec!["demo".to_string()],
        category: category.map(str::to_string),
        confidence: category.map(|_| 0.9),
        colors: category.map(|_| vec!["#ff0000".to_string()]),
        analyzed: category.is_some(),
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn find_or_create_is_idempotent(pool: PgPool) {
    let first = UserRepo::find_or_create(&pool, "line", "sub-1", Some("A"), None)
        .await
        .unwrap();
    let second = UserRepo::find_or_create(&pool, "line", "sub-1", None, None)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    // A missing name on a later sight must not wipe the stored one.
    assert_eq!(second.name.as_deref(), Some("A"));
}

#[sqlx::test(migrations = "./migrations")]
async fn fresh_profile_data_overwrites(pool: PgPool) {
    UserRepo::find_or_create(&pool, "line", "sub-1", Some("Old"), None)
        .await
        .unwrap();
    let updated = UserRepo::find_or_create(&pool, "line", "sub-1", Some("New"), Some("http://a"))
        .await
        .unwrap();

    assert_eq!(updated.name.as_deref(), Some("New"));
    assert_eq!(updated.avatar_url.as_deref(), Some("http://a"));
}

// ---------------------------------------------------------------------------
// Albums
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn album_crud(pool: PgPool) {
    let owner = seed_user(&pool, "sub-1").await;

    let album = AlbumRepo::create(&pool, owner, &new_album("Trip")).await.unwrap();
    assert_eq!(album.title, "Trip");
    assert!(!album.is_public);

    let updated = AlbumRepo::update(
        &pool,
        album.id,
        &UpdateAlbum {
            title: None,
            description: Some("Okinawa".to_string()),
            is_public: Some(true),
        },
    )
    .await
    .unwrap()
    .expect("album exists");

    // COALESCE update: untouched fields keep their values.
    assert_eq!(updated.title, "Trip");
    assert_eq!(updated.description.as_deref(), Some("Okinawa"));
    assert!(updated.is_public);

    let listed = AlbumRepo::list_by_owner(&pool, owner).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_album_removes_media_first(pool: PgPool) {
    let owner = seed_user(&pool, "sub-1").await;
    let album = AlbumRepo::create(&pool, owner, &new_album("Trip")).await.unwrap();

    let media = MediaRepo::create(&pool, &new_media(album.id, owner, None))
        .await
        .unwrap();
    SlideshowJobRepo::create(&pool, album.id, &SlideshowParams::default())
        .await
        .unwrap();

    let deleted = AlbumRepo::delete_with_media(&pool, album.id).await.unwrap();
    assert!(deleted);

    // No orphaned media remain queryable.
    assert!(MediaRepo::find_by_id(&pool, media.id).await.unwrap().is_none());
    assert!(AlbumRepo::find_by_id(&pool, album.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn media_roundtrip_preserves_tags_and_colors(pool: PgPool) {
    let owner = seed_user(&pool, "sub-1").await;
    let album = AlbumRepo::create(&pool, owner, &new_album("Trip")).await.unwrap();

    let created = MediaRepo::create(&pool, &new_media(album.id, owner, Some("landscape")))
        .await
        .unwrap();

    let fetched = MediaRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("media exists");
    assert_eq!(fetched.tags.0, vec!["demo"]);
    assert_eq!(fetched.colors.as_ref().unwrap().0, vec!["#ff0000"]);
    assert!(fetched.analyzed);
    assert_eq!(fetched.category.as_deref(), Some("landscape"));
}

#[sqlx::test(migrations = "./migrations")]
async fn category_stats_descend_by_count(pool: PgPool) {
    let owner = seed_user(&pool, "sub-1").await;
    let album = AlbumRepo::create(&pool, owner, &new_album("Trip")).await.unwrap();

    for _ in 0..3 {
        MediaRepo::create(&pool, &new_media(album.id, owner, Some("landscape")))
            .await
            .unwrap();
    }
    MediaRepo::create(&pool, &new_media(album.id, owner, Some("food")))
        .await
        .unwrap();
    // Unanalyzed media must not show up in the stats.
    MediaRepo::create(&pool, &new_media(album.id, owner, None))
        .await
        .unwrap();

    let stats = MediaRepo::category_stats(&pool, owner).await.unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].category, "landscape");
    assert_eq!(stats[0].count, 3);
    assert_eq!(stats[1].category, "food");
    assert_eq!(stats[1].count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_by_category_is_scoped_to_owner(pool: PgPool) {
    let alice = seed_user(&pool, "sub-a").await;
    let bob = seed_user(&pool, "sub-b").await;
    let album_a = AlbumRepo::create(&pool, alice, &new_album("A")).await.unwrap();
    let album_b = AlbumRepo::create(&pool, bob, &new_album("B")).await.unwrap();

    MediaRepo::create(&pool, &new_media(album_a.id, alice, Some("portrait")))
        .await
        .unwrap();
    MediaRepo::create(&pool, &new_media(album_b.id, bob, Some("portrait")))
        .await
        .unwrap();

    let mine = MediaRepo::list_by_category(&pool, alice, "portrait", 20, 0)
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].owner_id, alice);
}

// ---------------------------------------------------------------------------
// Slideshow jobs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn job_lifecycle_success(pool: PgPool) {
    let owner = seed_user(&pool, "sub-1").await;
    let album = AlbumRepo::create(&pool, owner, &new_album("Trip")).await.unwrap();

    let job = SlideshowJobRepo::create(&pool, album.id, &SlideshowParams::default())
        .await
        .unwrap();
    assert_eq!(job.status, status::QUEUED);
    assert_eq!(job.progress, 0);
    assert_eq!(job.params.0.transition, "crossfade");
    assert_eq!(job.params.0.fps, 30);

    SlideshowJobRepo::mark_processing(&pool, job.id, 10).await.unwrap();
    SlideshowJobRepo::mark_done(&pool, job.id, "local:slideshows/1/1.mp4")
        .await
        .unwrap();

    let done = SlideshowJobRepo::find_by_id(&pool, job.id)
        .await
        .unwrap()
        .expect("job exists");
    assert_eq!(done.status, status::DONE);
    assert_eq!(done.progress, 100);
    assert_eq!(done.result_key.as_deref(), Some("local:slideshows/1/1.mp4"));
}

#[sqlx::test(migrations = "./migrations")]
async fn job_failure_keeps_last_progress(pool: PgPool) {
    let owner = seed_user(&pool, "sub-1").await;
    let album = AlbumRepo::create(&pool, owner, &new_album("Trip")).await.unwrap();
    let job = SlideshowJobRepo::create(&pool, album.id, &SlideshowParams::default())
        .await
        .unwrap();

    SlideshowJobRepo::mark_processing(&pool, job.id, 10).await.unwrap();
    SlideshowJobRepo::mark_failed(&pool, job.id, "storage write failed")
        .await
        .unwrap();

    let failed = SlideshowJobRepo::find_by_id(&pool, job.id)
        .await
        .unwrap()
        .expect("job exists");
    assert_eq!(failed.status, status::FAILED);
    assert_eq!(failed.progress, 10);
    assert_eq!(failed.error_msg.as_deref(), Some("storage write failed"));
    assert!(failed.result_key.is_none());
}
