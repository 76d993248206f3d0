//! Principal resolution for handlers.
//!
//! Handlers call these explicitly with the request's [`AuthCtx`]; nothing is
//! injected behind their back.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{AppError, ErrorCode};
use crate::repos::{UserLookup, UserRecord};
use crate::services::auth::context::{AuthCtx, Principal};

/// The caller's claims-only identity.
pub fn resolve_minimal(ctx: &AuthCtx) -> Result<&Principal, AppError> {
    ctx.principal()
        .ok_or(AppError::Code(ErrorCode::AuthenticationFailed))
}

/// The caller's full user record.
///
/// A valid token whose account has since disappeared is `USER_NOT_FOUND`,
/// not an authentication failure. The lookup is bounded by `timeout`.
pub async fn resolve_full(
    ctx: &AuthCtx,
    users: &dyn UserLookup,
    timeout: Duration,
) -> Result<UserRecord, AppError> {
    let principal = resolve_minimal(ctx)?;

    let found = tokio::time::timeout(timeout, users.find_by_public_id(principal.subject))
        .await
        .map_err(|_| {
            warn!(
                subject = %principal.subject,
                timeout_ms = timeout.as_millis() as u64,
                "user lookup timed out"
            );
            AppError::Code(ErrorCode::ServiceUnavailable)
        })??;

    match found {
        Some(user) => Ok(user),
        None => {
            debug!(subject = %principal.subject, "token subject has no account");
            Err(AppError::Code(ErrorCode::UserNotFound))
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::repos::memory::{self, MemoryUserRepo};
    use crate::services::auth::failure::AuthFailure;
    use crate::services::auth::role::{Role, RoleSet};

    const SUB: &str = "11111111-1111-1111-1111-111111111111";
    const TIMEOUT: Duration = Duration::from_secs(2);

    fn authenticated() -> AuthCtx {
        AuthCtx::Authenticated(Principal {
            subject: Uuid::parse_str(SUB).unwrap(),
            roles: RoleSet::from([Role::User]),
            token: "tok".to_string(),
        })
    }

    #[test]
    fn minimal_requires_a_principal() {
        assert_eq!(resolve_minimal(&authenticated()).unwrap().subject.to_string(), SUB);

        for ctx in [AuthCtx::Anonymous, AuthCtx::Failed(AuthFailure::Expired)] {
            let err = resolve_minimal(&ctx).unwrap_err();
            assert_eq!(err.code(), ErrorCode::AuthenticationFailed);
        }
    }

    #[tokio::test]
    async fn full_returns_the_stored_record() {
        let users =
            MemoryUserRepo::new().with_user(memory::user(SUB, "alice", "x", RoleSet::new()));

        let user = resolve_full(&authenticated(), &users, TIMEOUT).await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn full_keeps_token_roles_separate_from_stored_roles() {
        let users = MemoryUserRepo::new().with_user(memory::user(
            SUB,
            "alice",
            "x",
            RoleSet::from([Role::Admin]),
        ));
        let ctx = authenticated();

        let user = resolve_full(&ctx, &users, TIMEOUT).await.unwrap();
        assert!(user.roles.contains(&Role::Admin));
        assert!(!ctx.principal().unwrap().has_role(Role::Admin));
    }

    #[tokio::test]
    async fn full_reports_missing_account() {
        let err = resolve_full(&authenticated(), &MemoryUserRepo::new(), TIMEOUT)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn full_fails_authentication_before_lookup() {
        let err = resolve_full(&AuthCtx::Anonymous, &MemoryUserRepo::new(), TIMEOUT)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AuthenticationFailed);
    }

    #[tokio::test]
    async fn full_lookup_is_bounded() {
        let users = MemoryUserRepo::new()
            .with_user(memory::user(SUB, "alice", "x", RoleSet::new()))
            .with_delay(Duration::from_secs(5));

        let err = resolve_full(&authenticated(), &users, Duration::from_millis(20))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
