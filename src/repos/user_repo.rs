/*
 * Responsibility
 * - UserLookup: the read-only user directory the auth layer depends on
 * - PgUserRepo: SQLx implementation over `users` / `user_roles`
 *
 * Identity is always the stable public id (UUID); the numeric primary key
 * never leaves this module.
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::services::auth::role::{self, RoleSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub public_id: Uuid,
    pub username: String,
    /// PHC string (`$argon2id$...`).
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub roles: RoleSet,
    pub enabled: bool,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_by_public_id(&self, public_id: Uuid) -> Result<Option<UserRecord>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError>;
}

#[derive(Debug, FromRow)]
struct UserRow {
    public_id: Uuid,
    username: String,
    password_hash: String,
    name: String,
    email: String,
    // comma-joined bare names, aggregated from user_roles
    roles: String,
    enabled: bool,
    locked: bool,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            public_id: row.public_id,
            username: row.username,
            password_hash: row.password_hash,
            name: row.name,
            email: row.email,
            roles: role::parse_names(&row.roles),
            enabled: row.enabled,
            locked: row.locked,
            created_at: row.created_at,
        }
    }
}

const SELECT_USER: &str = r#"
    SELECT u.public_id, u.username, u.password_hash, u.name, u.email,
           COALESCE(string_agg(r.role, ',' ORDER BY r.role), '') AS roles,
           u.enabled, u.locked, u.created_at
    FROM users u
    LEFT JOIN user_roles r ON r.user_id = u.id
"#;

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserLookup for PgUserRepo {
    async fn find_by_public_id(&self, public_id: Uuid) -> Result<Option<UserRecord>, RepoError> {
        let sql = format!("{SELECT_USER} WHERE u.public_id = $1 GROUP BY u.id");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(public_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError> {
        let sql = format!("{SELECT_USER} WHERE u.username = $1 GROUP BY u.id");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(UserRecord::from))
    }
}

#[cfg(test)]
mod tests {
    use sqlx::postgres::PgPoolOptions;

    use super::*;
    use crate::services::auth::role::Role;

    /// Needs a scratch PostgreSQL database:
    /// `DATABASE_URL=postgres://... cargo test -- --ignored`
    #[tokio::test]
    #[ignore]
    async fn pg_repo_reads_users_with_their_roles() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let db = PgPoolOptions::new().connect(&url).await.unwrap();
        sqlx::migrate!("./migrations").run(&db).await.unwrap();

        let public_id = Uuid::new_v4();
        let username = format!("u{}", &public_id.simple().to_string()[..12]);

        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO users (public_id, username, password_hash, name, email)
             VALUES ($1, $2, 'hash', 'Test User', $3) RETURNING id",
        )
        .bind(public_id)
        .bind(&username)
        .bind(format!("{username}@example.com"))
        .fetch_one(&db)
        .await
        .unwrap();

        for name in ["USER", "ADMIN"] {
            sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
                .bind(id)
                .bind(name)
                .execute(&db)
                .await
                .unwrap();
        }

        let repo = PgUserRepo::new(db.clone());

        let by_id = repo.find_by_public_id(public_id).await.unwrap().unwrap();
        assert_eq!(by_id.username, username);
        assert_eq!(by_id.roles, RoleSet::from([Role::User, Role::Admin]));
        assert!(by_id.enabled);
        assert!(!by_id.locked);

        let by_name = repo.find_by_username(&username).await.unwrap().unwrap();
        assert_eq!(by_name, by_id);

        assert!(repo.find_by_public_id(Uuid::new_v4()).await.unwrap().is_none());

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&db)
            .await
            .unwrap();
    }
}
