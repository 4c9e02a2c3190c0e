//! User entity model.
//!
//! Users are provisioned by the auth layer from a verified OAuth identity
//! (provider + provider-specific subject); there is no local signup.

use serde::Serialize;
use sqlx::FromRow;

use omoide_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    /// Auth provider name (e.g. `"line"`).
    pub provider: String,
    /// Provider-specific subject identifier.
    pub provider_id: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
