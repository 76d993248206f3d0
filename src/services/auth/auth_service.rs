use std::{sync::Arc, time::Duration};

use argon2::password_hash;
use tracing::{debug, info};

use crate::error::{AppError, ErrorCode};
use crate::repos::{UserLookup, UserRecord};
use crate::services::auth::context::AuthCtx;
use crate::services::auth::jwt::JwtCodec;
use crate::services::auth::password::{self, PasswordVerifier};
use crate::services::auth::principal;

pub const TOKEN_TYPE: &str = "Bearer";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

/// Token issuance/verification plus the user-directory collaborators.
///
/// Everything inside is immutable after startup, so one instance is shared
/// by every request.
#[derive(Clone)]
pub struct AuthService {
    codec: JwtCodec,
    users: Arc<dyn UserLookup>,
    passwords: Arc<dyn PasswordVerifier>,
    // checked instead of a real hash when the username is unknown
    dummy_hash: String,
    access_token_ttl_seconds: u64,
    lookup_timeout: Duration,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("codec", &self.codec)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}

impl AuthService {
    pub fn new(
        codec: JwtCodec,
        users: Arc<dyn UserLookup>,
        passwords: Arc<dyn PasswordVerifier>,
        access_token_ttl_seconds: u64,
        lookup_timeout: Duration,
    ) -> Result<Self, password_hash::Error> {
        Ok(Self {
            codec,
            users,
            passwords,
            dummy_hash: password::dummy_hash()?,
            access_token_ttl_seconds,
            lookup_timeout,
        })
    }

    pub fn codec(&self) -> &JwtCodec {
        &self.codec
    }

    /// Exchange username/password for an access token.
    ///
    /// Unknown user and wrong password are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AppError> {
        let found = tokio::time::timeout(self.lookup_timeout, self.users.find_by_username(username))
            .await
            .map_err(|_| AppError::Code(ErrorCode::ServiceUnavailable))??;

        let hash = found
            .as_ref()
            .map_or(self.dummy_hash.as_str(), |u| u.password_hash.as_str());
        let matches = self.passwords.verify(password, hash);

        let user = match found {
            Some(u) if matches => u,
            _ => {
                debug!(username, "login rejected: bad credentials");
                return Err(AppError::Code(ErrorCode::InvalidCredentials));
            }
        };

        if !user.enabled {
            return Err(AppError::Code(ErrorCode::AccountDisabled));
        }
        if user.locked {
            return Err(AppError::Code(ErrorCode::AccountLocked));
        }

        let access_token = self.codec.issue(
            &user.public_id.to_string(),
            &user.roles,
            self.access_token_ttl_seconds,
        )?;

        info!(subject = %user.public_id, "access token issued");

        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE,
            expires_in: self.access_token_ttl_seconds,
        })
    }

    /// Full user record of the caller; see [`principal::resolve_full`].
    pub async fn current_user(&self, ctx: &AuthCtx) -> Result<UserRecord, AppError> {
        principal::resolve_full(ctx, self.users.as_ref(), self.lookup_timeout).await
    }

    /// Look up any user by public id (admin use).
    pub async fn find_user(&self, public_id: uuid::Uuid) -> Result<UserRecord, AppError> {
        tokio::time::timeout(self.lookup_timeout, self.users.find_by_public_id(public_id))
            .await
            .map_err(|_| AppError::Code(ErrorCode::ServiceUnavailable))??
            .ok_or(AppError::Code(ErrorCode::UserNotFound))
    }
}
