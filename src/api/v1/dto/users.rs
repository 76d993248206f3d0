/*
 * Responsibility
 * - Users response DTOs
 * - Only the public id (UUID) is ever exposed
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::repos::UserRecord;
use crate::services::auth::Principal;
use crate::services::auth::role;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    /// Comma-joined authorities, e.g. "ROLE_USER,ROLE_ADMIN"
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(u: UserRecord) -> Self {
        Self {
            id: u.public_id,
            role: role::join_authorities(&u.roles),
            username: u.username,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

/// What the token alone says about the caller.
#[derive(Debug, Serialize)]
pub struct PrincipalResponse {
    pub id: Uuid,
    pub roles: Vec<String>,
}

impl From<&Principal> for PrincipalResponse {
    fn from(p: &Principal) -> Self {
        Self {
            id: p.subject,
            roles: p.roles.iter().map(|r| r.authority()).collect(),
        }
    }
}
