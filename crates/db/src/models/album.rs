//! Album entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use omoide_core::types::{DbId, Timestamp};

/// A row from the `albums` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Album {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Album {
    /// Whether `user_id` may view this album (owner, or the album is public).
    pub fn viewable_by(&self, user_id: DbId) -> bool {
        self.owner_id == user_id || self.is_public
    }
}

/// DTO for creating a new album.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbum {
    pub title: String,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

/// DTO for updating an existing album. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlbum {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}
