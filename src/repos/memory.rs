//! In-memory user directory for tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::repos::user_repo::{UserLookup, UserRecord};
use crate::services::auth::role::RoleSet;

#[derive(Debug, Default)]
pub struct MemoryUserRepo {
    users: HashMap<Uuid, UserRecord>,
    delay: Option<Duration>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: UserRecord) -> Self {
        self.users.insert(user.public_id, user);
        self
    }

    /// Every lookup sleeps this long first.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl UserLookup for MemoryUserRepo {
    async fn find_by_public_id(&self, public_id: Uuid) -> Result<Option<UserRecord>, RepoError> {
        self.pause().await;
        Ok(self.users.get(&public_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError> {
        self.pause().await;
        Ok(self
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

pub fn user(public_id: &str, username: &str, password_hash: &str, roles: RoleSet) -> UserRecord {
    UserRecord {
        public_id: Uuid::parse_str(public_id).unwrap(),
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        name: format!("{username} name"),
        email: format!("{username}@example.com"),
        roles,
        enabled: true,
        locked: false,
        created_at: Utc::now(),
    }
}
