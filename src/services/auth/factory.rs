//! Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::repos::PgUserRepo;
use crate::services::auth::AuthService;
use crate::services::auth::jwt::JwtCodec;
use crate::services::auth::password::Argon2Verifier;

pub fn build_auth_service(config: &Config) -> anyhow::Result<Arc<AuthService>> {
    let codec = JwtCodec::new(&config.jwt_secret)?;

    // Connections are opened on first use; startup does not wait on the database.
    let db = PgPoolOptions::new()
        .acquire_timeout(config.user_lookup_timeout)
        .connect_lazy(&config.database_url)?;

    let auth = AuthService::new(
        codec,
        Arc::new(PgUserRepo::new(db)),
        Arc::new(Argon2Verifier),
        config.access_token_ttl_seconds,
        config.user_lookup_timeout,
    )?;

    Ok(Arc::new(auth))
}
