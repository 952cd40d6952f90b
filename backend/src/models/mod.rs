//! Database models for Stocky
//!
//! Re-exports models from the shared crate and adds backend-only rows

use uuid::Uuid;

pub use shared::models::*;

/// Credentials row used by login; the hash never leaves the backend
#[derive(Debug, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserCredentials {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            role: self.role,
            created_at: self.created_at,
        }
    }
}
