//! HTTP-level integration tests for the album endpoints: authentication,
//! CRUD, ownership enforcement, and public visibility.

mod common;

use axum::http::StatusCode;
use common::{auth_token, body_json, delete, get, get_unauthed, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn albums_require_a_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_unauthed(app, "/api/v1/albums").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/albums", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn first_authenticated_request_provisions_the_user(pool: PgPool) {
    let token = auth_token("U-line-1", "Hana");
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/albums", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let row: (String,) =
        sqlx::query_as("SELECT name FROM users WHERE provider_id = 'U-line-1'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(row.0, "Hana");
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_album_returns_201(pool: PgPool) {
    let token = auth_token("U-line-1", "Hana");
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/albums",
        &token,
        serde_json::json!({"title": "Summer 2025", "description": "Beach trip"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Summer 2025");
    assert_eq!(json["data"]["is_public"], false);
    assert!(json["data"]["id"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_title_is_rejected(pool: PgPool) {
    let token = auth_token("U-line-1", "Hana");
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/albums",
        &token,
        serde_json::json!({"title": "   "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_album_includes_media_list(pool: PgPool) {
    let token = auth_token("U-line-1", "Hana");
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/albums",
            &token,
            serde_json::json!({"title": "Empty"}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/albums/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Empty");
    assert_eq!(json["data"]["media"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_album_changes_only_provided_fields(pool: PgPool) {
    let token = auth_token("U-line-1", "Hana");
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/albums",
            &token,
            serde_json::json!({"title": "Original", "description": "Keep me"}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/albums/{id}"),
        &token,
        serde_json::json!({"title": "Renamed", "isPublic": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Renamed");
    assert_eq!(json["data"]["description"], "Keep me");
    assert_eq!(json["data"]["is_public"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn nonexistent_album_returns_404(pool: PgPool) {
    let token = auth_token("U-line-1", "Hana");
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/albums/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_album_returns_204_and_removes_it(pool: PgPool) {
    let token = auth_token("U-line-1", "Hana");
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/albums",
            &token,
            serde_json::json!({"title": "Delete Me"}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/albums/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/albums/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Ownership and visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_returns_only_the_callers_albums(pool: PgPool) {
    let hana = auth_token("U-line-1", "Hana");
    let taro = auth_token("U-line-2", "Taro");

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/albums",
        &hana,
        serde_json::json!({"title": "Hana's"}),
    )
    .await;
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/albums",
        &taro,
        serde_json::json!({"title": "Taro's"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/albums", &hana).await).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Hana's"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn private_album_is_hidden_from_strangers(pool: PgPool) {
    let hana = auth_token("U-line-1", "Hana");
    let taro = auth_token("U-line-2", "Taro");

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/albums",
            &hana,
            serde_json::json!({"title": "Private"}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/albums/{id}"), &taro).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_album_is_viewable_but_not_editable_by_strangers(pool: PgPool) {
    let hana = auth_token("U-line-1", "Hana");
    let taro = auth_token("U-line-2", "Taro");

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/albums",
            &hana,
            serde_json::json!({"title": "Shared", "isPublic": true}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/albums/{id}"), &taro).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/albums/{id}"),
        &taro,
        serde_json::json!({"title": "Hijacked"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/albums/{id}"), &taro).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
